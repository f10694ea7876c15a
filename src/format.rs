//! Build rule rendering.
use crate::config::SweepConfig;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How parameter values are written in build rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Shortest text reading back as the same `f64`, integral values keep a `.0`
    /// and very small or very large magnitudes use exponent notation (`1e-05`).
    Repr,
    /// Fixed number of decimals
    Fixed(usize),
}

impl ValueFormat {
    /// Renders `value` as text
    pub fn render(&self, value: f64) -> String {
        match *self {
            ValueFormat::Repr => repr(value),
            ValueFormat::Fixed(precision) => format!("{value:.precision$}"),
        }
    }
}

/// Shortest round-trip text of `value`.
///
/// Plain decimal notation is used for magnitudes in `[1e-4, 1e16)`,
/// exponent notation with a signed, at least two digits exponent otherwise.
pub fn repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0. { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0. || (1e-4..1e16).contains(&magnitude) {
        let text = format!("{value}");
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    } else {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => text,
        }
    }
}

/// A build rule line: an identifier, placeholder tokens and simulator flags.
///
/// Rendered as `<id>  <placeholders...> --<flag>=<value> ...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildRule {
    /// Rule identifier embedding the parameter values
    pub id: String,
    /// Tokens between identifier and flags
    pub placeholders: Vec<String>,
    /// (flag name, rendered value) pairs
    pub flags: Vec<(String, String)>,
}

impl BuildRule {
    /// Builds the rule of one sample whose components follow `config` parameters order
    pub fn new(config: &SweepConfig, values: ArrayView1<f64>) -> Self {
        let rendered: Vec<String> = values
            .iter()
            .map(|&v| config.value_format.render(v))
            .collect();
        let mut id = config.prefix.clone();
        let mut flags = Vec::with_capacity(config.params.len());
        for (param, value) in config.params.iter().zip(rendered) {
            id.push('_');
            id.push_str(&param.tag);
            id.push('_');
            id.push_str(&value);
            flags.push((format!("{}{}", config.flag_prefix, param.name), value));
        }
        BuildRule {
            id,
            placeholders: config.placeholders.clone(),
            flags,
        }
    }
}

impl fmt::Display for BuildRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ", self.id)?;
        for token in self.placeholders.iter() {
            write!(f, " {token}")?;
        }
        for (name, value) in self.flags.iter() {
            write!(f, " --{name}={value}")?;
        }
        Ok(())
    }
}
