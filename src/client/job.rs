use crate::client::messages::job_input::{MethodType, RunType};
use crate::client::messages::mol::UnitType;
use crate::client::messages::{JobInput, Mol};
use crate::io::TcInput;
use anyhow::{bail, Context, Result};

/// Keywords that are sent in dedicated fields of the job input instead of the user options
const MOLECULE_KEYWORDS: [&str; 6] = [
    "method",
    "basis",
    "charge",
    "spinmult",
    "closed_shell",
    "restricted",
];

/// The part of the job input that stays the same for every geometry
#[derive(Debug, Clone, PartialEq)]
pub struct JobTemplate {
    pub atom_types: Vec<String>,
    pub method: MethodType,
    pub basis: String,
    pub charge: i32,
    pub multiplicity: i32,
    pub closed: bool,
    pub restricted: bool,
    pub user_options: Vec<String>,
}

/// Split a method keyword like `rb3lyp` or `uhf` into the method and the
/// requested restriction, if one is given
fn parse_method(keyword: &str) -> Option<(MethodType, Option<bool>)> {
    let keyword: String = keyword.to_lowercase();
    if let Some(method) = MethodType::from_keyword(&keyword) {
        return Some((method, None));
    }
    let (restricted, name): (bool, &str) = if let Some(name) = keyword.strip_prefix('r') {
        (true, name)
    } else if let Some(name) = keyword.strip_prefix('u') {
        (false, name)
    } else {
        return None;
    };
    MethodType::from_keyword(name).map(|method| (method, Some(restricted)))
}

impl JobTemplate {
    /// Create the template from the options of the TeraChem input file. Fails if the
    /// options are incomplete or do not fit to the atoms.
    pub fn new(input: &TcInput, atom_types: &[String]) -> Result<Self> {
        if input.is_empty() {
            bail!("no options were read from the TeraChem input");
        }
        if atom_types.is_empty() {
            bail!("the QM region does not contain any atom");
        }
        let method_keyword: &str = input
            .get("method")
            .context("the keyword `method` is missing")?;
        let (method, method_restricted) = parse_method(method_keyword)
            .with_context(|| format!("the method `{}` is not supported", method_keyword))?;
        let basis: String = input
            .get("basis")
            .context("the keyword `basis` is missing")?
            .to_string();
        let charge: i32 = input.get_parsed("charge")?.unwrap_or(0);
        let multiplicity: i32 = input.get_parsed("spinmult")?.unwrap_or(1);
        if multiplicity < 1 {
            bail!("invalid spin multiplicity {}", multiplicity);
        }
        let closed: bool = input.get_bool("closed_shell")?.unwrap_or(multiplicity == 1);
        let restricted: bool = match (method_restricted, input.get_bool("restricted")?) {
            (Some(from_method), Some(from_keyword)) if from_method != from_keyword => {
                bail!("the method `{}` contradicts the keyword `restricted`", method_keyword)
            }
            (Some(from_method), _) => from_method,
            (None, Some(from_keyword)) => from_keyword,
            (None, None) => closed,
        };

        let user_options: Vec<String> = input
            .options
            .iter()
            .filter(|(key, _)| !MOLECULE_KEYWORDS.contains(&key.as_str()))
            .flat_map(|(key, value)| [key.clone(), value.clone()])
            .collect();

        Ok(Self {
            atom_types: atom_types.to_vec(),
            method,
            basis,
            charge,
            multiplicity,
            closed,
            restricted,
            user_options,
        })
    }

    pub fn n_atoms(&self) -> usize {
        self.atom_types.len()
    }

    /// Whether the input file already prescribes a guess for the wavefunction
    pub fn has_guess(&self) -> bool {
        self.user_options
            .chunks(2)
            .any(|pair| pair.first().map(String::as_str) == Some("guess"))
    }

    /// Build the gradient job for a geometry given in bohr. The orbital files
    /// of a previous job are passed as guess, unless the input file sets its own guess.
    pub fn job_input(&self, coordinates: &[f64], guess: Option<&[String]>) -> JobInput {
        let mol = Mol {
            atoms: self.atom_types.clone(),
            xyz: coordinates.to_vec(),
            units: UnitType::Bohr as i32,
            charge: self.charge,
            multiplicity: self.multiplicity,
            closed: self.closed,
            restricted: self.restricted,
        };
        let mut user_options: Vec<String> = self.user_options.clone();
        if let Some(files) = guess.filter(|files| !files.is_empty() && !self.has_guess()) {
            user_options.push(String::from("guess"));
            user_options.push(files.join(" "));
        }
        JobInput {
            mol: Some(mol),
            run: RunType::Gradient as i32,
            method: self.method as i32,
            basis: self.basis.clone(),
            user_options,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms() -> Vec<String> {
        vec![String::from("C"), String::from("O")]
    }

    fn template(input: &str) -> Result<JobTemplate> {
        JobTemplate::new(&input.parse().unwrap(), &atoms())
    }

    #[test]
    fn closed_shell_defaults() {
        let job: JobTemplate = template("method b3lyp\nbasis 6-31g\nconvthre 3e-5\n").unwrap();
        assert_eq!(job.method, MethodType::B3lyp);
        assert_eq!(job.basis, "6-31g");
        assert_eq!(job.charge, 0);
        assert_eq!(job.multiplicity, 1);
        assert!(job.closed);
        assert!(job.restricted);
        assert_eq!(job.user_options, vec!["convthre", "3e-5"]);
    }

    #[test]
    fn restriction_from_method_prefix() {
        let job: JobTemplate = template("method uhf\nbasis sto-3g\nspinmult 3\n").unwrap();
        assert_eq!(job.method, MethodType::Hf);
        assert!(!job.restricted);
        assert!(!job.closed);
        let job: JobTemplate = template("method revpbe\nbasis sto-3g\n").unwrap();
        assert_eq!(job.method, MethodType::Revpbe);
    }

    #[test]
    fn incomplete_or_invalid_options() {
        assert!(template("").is_err());
        assert!(template("basis 6-31g\n").is_err());
        assert!(template("method b3lyp\n").is_err());
        assert!(template("method mp2\nbasis 6-31g\n").is_err());
        assert!(template("method rhf\nbasis 6-31g\nrestricted no\n").is_err());
        assert!(JobTemplate::new(&"method hf\nbasis 6-31g".parse().unwrap(), &[]).is_err());
    }

    #[test]
    fn gradient_job_in_bohr() {
        let job: JobTemplate = template("method pbe0\nbasis def2-svp\n").unwrap();
        let coords: Vec<f64> = vec![0.0, 0.0, 0.0, 0.0, 0.0, 2.13];
        let input: JobInput = job.job_input(&coords, None);
        assert_eq!(input.run, RunType::Gradient as i32);
        assert_eq!(input.method, MethodType::Pbe0 as i32);
        let mol: Mol = input.mol.unwrap();
        assert_eq!(mol.units, UnitType::Bohr as i32);
        assert_eq!(mol.atoms, atoms());
        assert_eq!(mol.xyz, coords);
        assert!(input.user_options.is_empty());
    }

    #[test]
    fn guess_from_previous_job() {
        let job: JobTemplate = template("method b3lyp\nbasis 6-31g\n").unwrap();
        let guess: Vec<String> = vec![String::from("scr/c0")];
        let input: JobInput = job.job_input(&[0.0; 6], Some(guess.as_slice()));
        assert_eq!(input.user_options, vec!["guess", "scr/c0"]);

        // a guess from the input file is never replaced
        let job: JobTemplate = template("method b3lyp\nbasis 6-31g\nguess start.c0\n").unwrap();
        assert!(job.has_guess());
        let input: JobInput = job.job_input(&[0.0; 6], Some(guess.as_slice()));
        assert_eq!(input.user_options, vec!["guess", "start.c0"]);
    }

    #[test]
    fn casscf_is_a_user_option() {
        let job: JobTemplate =
            template("method hf\nbasis 6-31g\ncasscf yes\nclosed 2\nactive 2\n").unwrap();
        assert_eq!(job.method, MethodType::Hf);
        assert_eq!(
            job.user_options,
            vec!["casscf", "yes", "closed", "2", "active", "2"]
        );
        assert!(template("method casscf\nbasis 6-31g\n").is_err());
    }
}
