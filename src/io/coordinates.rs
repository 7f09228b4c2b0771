use anyhow::{Context, Result};
use chemfiles::Trajectory;
use ndarray::Array2;
use std::path::Path;
use tcpb_session::Frame;

/// Extract the element symbols and the positions (in angstrom) from a [Frame](chemfiles::Frame)
pub fn frame_to_geometry(frame: &chemfiles::Frame) -> Result<Frame> {
    let positions: Array2<f64> = Array2::from_shape_vec(
        (frame.size(), 3),
        frame
            .positions()
            .iter()
            .flat_map(|array| array.iter())
            .cloned()
            .collect(),
    )?;
    // the atomic type is the element, the name can be a label like `CA` in pdb files
    let atom_types: Vec<String> = (0..frame.size())
        .map(|i| frame.atom(i).atomic_type())
        .collect();
    Ok(Frame::new(atom_types, positions))
}

/// Read every geometry of a trajectory file like .xyz or .pdb in the order of the file
pub fn read_trajectory(filename: &Path) -> Result<Vec<Frame>> {
    let mut trajectory = Trajectory::open(filename, 'r')
        .with_context(|| format!("Unable to open the trajectory {}", filename.display()))?;
    let n_steps: usize = trajectory.nsteps();
    let mut frames: Vec<Frame> = Vec::with_capacity(n_steps);
    let mut frame = chemfiles::Frame::new();
    for step in 0..n_steps {
        trajectory.read(&mut frame).with_context(|| {
            format!(
                "Unable to read step {} of the trajectory {}",
                step,
                filename.display()
            )
        })?;
        frames.push(frame_to_geometry(&frame)?);
    }
    Ok(frames)
}
