use anyhow::{bail, Context, Result};
use log::warn;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Keywords that are controlled by the client and therefore not forwarded to the server
pub const IGNORED_KEYWORDS: [&str; 7] = [
    "run",
    "coordinates",
    "units",
    "jobname",
    "scrdir",
    "keep_scr",
    "qmindices",
];

/// The keyword/value pairs of a TeraChem input file in the order of the file.
/// Keywords are stored in lower case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TcInput {
    pub options: Vec<(String, String)>,
}

impl TcInput {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The value of the last occurrence of the keyword
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(key, _)| key == keyword)
            .map(|(_, value)| value.as_str())
    }

    /// Parse the value of a yes/no keyword. Returns `Ok(None)` if the keyword is not set.
    pub fn get_bool(&self, keyword: &str) -> Result<Option<bool>> {
        self.get(keyword).map(|value| parse_bool(keyword, value)).transpose()
    }

    pub fn get_parsed<T: FromStr>(&self, keyword: &str) -> Result<Option<T>> {
        match self.get(keyword) {
            Some(value) => match value.parse::<T>() {
                Ok(parsed) => Ok(Some(parsed)),
                Err(_) => bail!("invalid value `{}` for keyword `{}`", value, keyword),
            },
            None => Ok(None),
        }
    }
}

fn parse_bool(keyword: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => bail!("invalid value `{}` for yes/no keyword `{}`", value, keyword),
    }
}

impl FromStr for TcInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options: Vec<(String, String)> = Vec::new();
        for line in s.lines() {
            // strip comments
            let line: &str = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let mut fields = line.splitn(2, char::is_whitespace);
            let keyword: String = fields.next().unwrap_or_default().to_lowercase();
            if keyword == "end" {
                break;
            }
            let value: String = fields
                .next()
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            if value.is_empty() {
                bail!("keyword `{}` without a value", keyword);
            }
            if IGNORED_KEYWORDS.contains(&keyword.as_str()) {
                warn!("The keyword `{}` is set by the client and is ignored", keyword);
                continue;
            }
            options.push((keyword, value));
        }
        Ok(Self { options })
    }
}

/// Read and parse a TeraChem input file
pub fn read_tc_input(filename: &Path) -> Result<TcInput> {
    let input: String = fs::read_to_string(filename)
        .with_context(|| format!("Unable to read TeraChem input {}", filename.display()))?;
    input
        .parse()
        .with_context(|| format!("Invalid TeraChem input {}", filename.display()))
}
