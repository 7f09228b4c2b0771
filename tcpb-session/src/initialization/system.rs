use crate::constants;
use crate::initialization::SessionConfiguration;
use crate::status::SessionError;
use ndarray::prelude::*;

/// A single geometry of the trajectory: the element symbols and the cartesian
/// coordinates in angstrom with shape (n_atoms, 3)
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub atom_types: Vec<String>,
    pub coordinates: Array2<f64>,
}

impl Frame {
    pub fn new(atom_types: Vec<String>, coordinates: Array2<f64>) -> Self {
        Self {
            atom_types,
            coordinates,
        }
    }

    pub fn n_atoms(&self) -> usize {
        self.coordinates.nrows()
    }

    /// The coordinates transformed from angstrom to bohr, flattened in row-major
    /// order (x1, y1, z1, x2, ...)
    pub fn coordinates_in_bohr(&self) -> Vec<f64> {
        let positions: Array2<f64> = &self.coordinates / constants::BOHR_TO_ANGS;
        positions.iter().cloned().collect()
    }
}

/// Struct that holds all geometries of the trajectory together with the
/// settings of the session. The element symbols of the first frame are used
/// for every geometry.
pub struct SystemData {
    pub config: SessionConfiguration,
    pub atom_types: Vec<String>,
    pub frames: Vec<Frame>,
}

impl TryFrom<(Vec<Frame>, SessionConfiguration)> for SystemData {
    type Error = SessionError;

    fn try_from(trajectory: (Vec<Frame>, SessionConfiguration)) -> Result<Self, Self::Error> {
        let (frames, config) = trajectory;
        let atom_types: Vec<String> = frames
            .first()
            .ok_or(SessionError::EmptyTrajectory)?
            .atom_types
            .clone();
        Ok(Self {
            config,
            atom_types,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn water(shift: f64) -> Frame {
        Frame::new(
            vec![String::from("O"), String::from("H"), String::from("H")],
            array![
                [0.0, 0.0, -0.0657441568 + shift],
                [0.0, 0.7574590974, 0.5217905143],
                [0.0, -0.7574590974, 0.5217905143],
            ],
        )
    }

    #[test]
    fn coordinates_are_converted_to_bohr() {
        let frame: Frame = water(0.0);
        let coords: Vec<f64> = frame.coordinates_in_bohr();
        assert_eq!(coords.len(), 9);
        assert_relative_eq!(coords[4], 0.7574590974 / constants::BOHR_TO_ANGS);
        assert_relative_eq!(coords[4], 1.4313902, epsilon = 1e-6);
        // row-major: the third value is the z coordinate of the first atom
        assert_relative_eq!(coords[2], -0.0657441568 / constants::BOHR_TO_ANGS);
        for (bohr, angs) in coords.iter().zip(frame.coordinates.iter()) {
            assert_relative_eq!(bohr * constants::BOHR_TO_ANGS, *angs, epsilon = 1e-12);
        }
    }

    #[test]
    fn atom_types_come_from_the_first_frame() {
        let mut second: Frame = water(0.1);
        second.atom_types[0] = String::from("S");
        let system =
            SystemData::try_from((vec![water(0.0), second], SessionConfiguration::default()))
                .unwrap();
        assert_eq!(system.atom_types, vec!["O", "H", "H"]);
        assert_eq!(system.frames.len(), 2);
        assert_eq!(system.frames[0].n_atoms(), 3);
    }

    #[test]
    fn empty_trajectory_is_rejected() {
        let result = SystemData::try_from((Vec::new(), SessionConfiguration::default()));
        assert!(matches!(result, Err(SessionError::EmptyTrajectory)));
    }
}
