//! Protobuf messages of the TeraChem server protocol

/// Molecular system of a job
#[derive(Clone, PartialEq, prost::Message)]
pub struct Mol {
    #[prost(string, repeated, tag = "1")]
    pub atoms: Vec<String>,
    #[prost(double, repeated, tag = "2")]
    pub xyz: Vec<f64>,
    #[prost(enumeration = "mol::UnitType", tag = "3")]
    pub units: i32,
    #[prost(int32, tag = "4")]
    pub charge: i32,
    #[prost(int32, tag = "5")]
    pub multiplicity: i32,
    #[prost(bool, tag = "6")]
    pub closed: bool,
    #[prost(bool, tag = "7")]
    pub restricted: bool,
}

pub mod mol {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum UnitType {
        Angstrom = 0,
        Bohr = 1,
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct JobInput {
    #[prost(message, optional, tag = "1")]
    pub mol: Option<Mol>,
    #[prost(enumeration = "job_input::RunType", tag = "2")]
    pub run: i32,
    #[prost(enumeration = "job_input::MethodType", tag = "3")]
    pub method: i32,
    #[prost(string, tag = "4")]
    pub basis: String,
    #[prost(string, tag = "5")]
    pub orb1afile: String,
    #[prost(string, tag = "6")]
    pub orb1bfile: String,
    /// flat list of keyword/value pairs
    #[prost(string, repeated, tag = "8")]
    pub user_options: Vec<String>,
}

pub mod job_input {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum RunType {
        Energy = 0,
        Gradient = 1,
        Coupling = 2,
        CiVecOverlap = 3,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
    #[repr(i32)]
    pub enum MethodType {
        Hf = 0,
        B3lyp = 1,
        Blyp = 2,
        B97 = 3,
        Wb97 = 4,
        Wb97x = 5,
        Wpbe = 6,
        Wpbeh = 7,
        Camb3lyp = 8,
        Pbe = 9,
        Pbe0 = 10,
        Revpbe = 11,
        Revpbe0 = 12,
        Bhandhlyp = 13,
        Pw91 = 14,
        B3lyp1 = 15,
        B3lyp5 = 16,
        Svwn = 17,
        Bop = 18,
        Mubop = 19,
    }

    impl MethodType {
        /// Look up the method by its TeraChem keyword
        pub fn from_keyword(keyword: &str) -> Option<Self> {
            let method: Self = match keyword {
                "hf" => Self::Hf,
                "b3lyp" => Self::B3lyp,
                "blyp" => Self::Blyp,
                "b97" => Self::B97,
                "wb97" => Self::Wb97,
                "wb97x" => Self::Wb97x,
                "wpbe" => Self::Wpbe,
                "wpbeh" => Self::Wpbeh,
                "camb3lyp" => Self::Camb3lyp,
                "pbe" => Self::Pbe,
                "pbe0" => Self::Pbe0,
                "revpbe" => Self::Revpbe,
                "revpbe0" => Self::Revpbe0,
                "bhandhlyp" => Self::Bhandhlyp,
                "pw91" => Self::Pw91,
                "b3lyp1" => Self::B3lyp1,
                "b3lyp5" => Self::B3lyp5,
                "svwn" => Self::Svwn,
                "bop" => Self::Bop,
                "mubop" => Self::Mubop,
                _ => return None,
            };
            Some(method)
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct JobOutput {
    #[prost(message, optional, tag = "1")]
    pub mol: Option<Mol>,
    #[prost(double, repeated, tag = "2")]
    pub energy: Vec<f64>,
    #[prost(double, repeated, tag = "3")]
    pub gradient: Vec<f64>,
    #[prost(double, repeated, tag = "4")]
    pub charges: Vec<f64>,
    #[prost(double, repeated, tag = "5")]
    pub spins: Vec<f64>,
    #[prost(double, repeated, tag = "6")]
    pub dipoles: Vec<f64>,
    #[prost(string, tag = "7")]
    pub job_dir: String,
    #[prost(string, tag = "8")]
    pub job_scr_dir: String,
    #[prost(int32, tag = "9")]
    pub server_job_id: i32,
    #[prost(string, tag = "10")]
    pub orb1afile: String,
    #[prost(string, tag = "11")]
    pub orb1bfile: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Status {
    #[prost(oneof = "status::JobStatus", tags = "1, 2, 3")]
    pub job_status: Option<status::JobStatus>,
    #[prost(string, tag = "4")]
    pub job_dir: String,
    #[prost(string, tag = "5")]
    pub job_scr_dir: String,
    #[prost(int32, tag = "6")]
    pub server_job_id: i32,
    #[prost(bool, tag = "7")]
    pub busy: bool,
}

pub mod status {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum JobStatus {
        #[prost(bool, tag = "1")]
        Accepted(bool),
        #[prost(bool, tag = "2")]
        Working(bool),
        #[prost(bool, tag = "3")]
        Completed(bool),
    }
}

impl Status {
    pub fn is_accepted(&self) -> bool {
        matches!(self.job_status, Some(status::JobStatus::Accepted(true)))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.job_status, Some(status::JobStatus::Completed(true)))
    }
}
