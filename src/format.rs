//! The printf-style display formats menus hand to sliders (`"%.2f"`,
//! `"%d%%"`, `"%.1fx"`). Only the subset the launcher uses is understood.

const FALLBACK_PRECISION: usize = 2;
const DEFAULT_FLOAT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Float { precision: usize },
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormat {
    prefix: String,
    conversion: Conversion,
    suffix: String,
}

impl ValueFormat {
    /// Parses `fmt`. Anything unrecognised falls back to `%.2f` with the
    /// literal text dropped.
    pub fn parse(fmt: &str) -> Self {
        Self::try_parse(fmt).unwrap_or(Self {
            prefix: String::new(),
            conversion: Conversion::Float {
                precision: FALLBACK_PRECISION,
            },
            suffix: String::new(),
        })
    }

    fn try_parse(fmt: &str) -> Option<Self> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conversion = None;
        let mut chars = fmt.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if conversion.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }
            // A second conversion is not something a slider label can use.
            if conversion.is_some() {
                return None;
            }

            let mut precision = None;
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                precision = Some(digits.parse().unwrap_or(0));
            }

            conversion = match chars.next()? {
                'f' => Some(Conversion::Float {
                    precision: precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
                }),
                'd' | 'i' if precision.is_none() => Some(Conversion::Int),
                _ => return None,
            };
        }

        Some(Self {
            prefix,
            conversion: conversion?,
            suffix,
        })
    }

    /// Decimal places shown; zero for integer formats.
    pub fn precision(&self) -> usize {
        match self.conversion {
            Conversion::Float { precision } => precision,
            Conversion::Int => 0,
        }
    }

    /// The smallest visible increment, `10^-precision`.
    pub fn step_unit(&self) -> f32 {
        10f32.powi(-(self.precision() as i32))
    }

    pub fn render_f32(&self, value: f32) -> String {
        let body = match self.conversion {
            Conversion::Float { precision } => format!("{value:.precision$}"),
            Conversion::Int => format!("{}", value.round() as i64),
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    pub fn render_i32(&self, value: i32) -> String {
        let body = match self.conversion {
            Conversion::Float { precision } => format!("{:.precision$}", value as f32),
            Conversion::Int => value.to_string(),
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}
