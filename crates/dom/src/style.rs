//! Typed inline style declarations.

use common::{MosaicError, MosaicResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Style properties the engine writes to elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Position,
    Left,
    Top,
    Width,
    Height,
    Opacity,
    Transform,
    Transition,
    PointerEvents,
}

impl StyleProperty {
    /// CSS property name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleProperty::Position => "position",
            StyleProperty::Left => "left",
            StyleProperty::Top => "top",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Transform => "transform",
            StyleProperty::Transition => "transition",
            StyleProperty::PointerEvents => "pointer-events",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared value.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Px(f32),
    Number(f32),
    Keyword(&'static str),
    Transform(TransformList),
    Transition(Transition),
}

impl StyleValue {
    pub fn as_px(&self) -> Option<f32> {
        match self {
            StyleValue::Px(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(v) => write!(f, "{}px", v),
            StyleValue::Number(v) => write!(f, "{}", v),
            StyleValue::Keyword(k) => f.write_str(k),
            StyleValue::Transform(t) => write!(f, "{}", t),
            StyleValue::Transition(t) => write!(f, "{}", t),
        }
    }
}

/// A single-property CSS transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Transitioned property, `all` for every property.
    pub property: &'static str,
    pub duration: Duration,
    /// CSS timing function text.
    pub timing: String,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ms {}",
            self.property,
            self.duration.as_millis(),
            self.timing
        )
    }
}

/// One CSS transform function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformFunction {
    Scale(f32),
    Translate(f32, f32),
    TranslateX(f32),
    TranslateY(f32),
    /// Degrees.
    Rotate(f32),
}

impl fmt::Display for TransformFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformFunction::Scale(s) => write!(f, "scale({})", s),
            TransformFunction::Translate(x, y) => write!(f, "translate({}px, {}px)", x, y),
            TransformFunction::TranslateX(x) => write!(f, "translateX({}px)", x),
            TransformFunction::TranslateY(y) => write!(f, "translateY({}px)", y),
            TransformFunction::Rotate(deg) => write!(f, "rotate({}deg)", deg),
        }
    }
}

/// Ordered list of transform functions, e.g. `scale(0.9) translateY(20px)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransformList(SmallVec<[TransformFunction; 2]>);

impl TransformList {
    pub fn none() -> Self {
        Self(SmallVec::new())
    }

    pub fn from_functions(functions: impl IntoIterator<Item = TransformFunction>) -> Self {
        Self(functions.into_iter().collect())
    }

    pub fn functions(&self) -> &[TransformFunction] {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Product of all scale factors.
    pub fn scale_factor(&self) -> f32 {
        self.0
            .iter()
            .filter_map(|f| match f {
                TransformFunction::Scale(s) => Some(*s),
                _ => None,
            })
            .product()
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, function) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}

impl FromStr for TransformList {
    type Err = MosaicError;

    fn from_str(s: &str) -> MosaicResult<Self> {
        let s = s.trim();
        if s.is_empty() || s == "none" {
            return Ok(Self::none());
        }

        let mut functions = SmallVec::new();
        let mut rest = s;
        while !rest.trim().is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| MosaicError::parse(format!("expected '(' in transform: {}", s)))?;
            let close = rest
                .find(')')
                .ok_or_else(|| MosaicError::parse(format!("unclosed transform function: {}", s)))?;
            if close < open {
                return Err(MosaicError::parse(format!("malformed transform: {}", s)));
            }

            let name = rest[..open].trim();
            let args: Vec<&str> = rest[open + 1..close].split(',').map(str::trim).collect();
            functions.push(parse_function(name, &args)?);
            rest = &rest[close + 1..];
        }

        Ok(Self(functions))
    }
}

impl TryFrom<String> for TransformList {
    type Error = MosaicError;

    fn try_from(value: String) -> MosaicResult<Self> {
        value.parse()
    }
}

impl From<TransformList> for String {
    fn from(list: TransformList) -> String {
        list.to_string()
    }
}

fn parse_function(name: &str, args: &[&str]) -> MosaicResult<TransformFunction> {
    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(MosaicError::parse(format!(
                "{} expects {} argument(s), got {}",
                name,
                n,
                args.len()
            )))
        }
    };

    match name {
        "scale" => {
            arity(1)?;
            Ok(TransformFunction::Scale(parse_number(args[0], "")?))
        }
        "translate" => {
            arity(2)?;
            Ok(TransformFunction::Translate(
                parse_number(args[0], "px")?,
                parse_number(args[1], "px")?,
            ))
        }
        "translateX" => {
            arity(1)?;
            Ok(TransformFunction::TranslateX(parse_number(args[0], "px")?))
        }
        "translateY" => {
            arity(1)?;
            Ok(TransformFunction::TranslateY(parse_number(args[0], "px")?))
        }
        "rotate" => {
            arity(1)?;
            Ok(TransformFunction::Rotate(parse_number(args[0], "deg")?))
        }
        other => Err(MosaicError::parse(format!(
            "unsupported transform function: {}",
            other
        ))),
    }
}

fn parse_number(text: &str, unit: &str) -> MosaicResult<f32> {
    let digits = if unit.is_empty() {
        text
    } else {
        text.strip_suffix(unit).unwrap_or(text)
    };
    digits
        .trim()
        .parse::<f32>()
        .map_err(|_| MosaicError::parse(format!("invalid number: {}", text)))
}

/// Inline style declarations in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InlineStyle {
    declarations: IndexMap<StyleProperty, StyleValue>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: StyleProperty, value: StyleValue) {
        self.declarations.insert(property, value);
    }

    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.declarations.get(&property)
    }

    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        self.declarations.shift_remove(&property)
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.declarations.iter().map(|(k, v)| (*k, v))
    }

    /// Serialize as a `style` attribute value.
    pub fn to_css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
