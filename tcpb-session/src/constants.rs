// Bohr radius in Angstrom (CODATA 2014)
pub const BOHR_TO_ANGS: f64 = 0.52917721067;
