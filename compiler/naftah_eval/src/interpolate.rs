//! String interpolation.
//!
//! Expands `${name}`, `${name:default}`, `${a:b:c}` and `{{name}}`
//! placeholders against a name to value context. Braces are matched once,
//! up front, with a stack, so expansion is a single left-to-right pass over
//! the template however many placeholders it holds; defaults are expanded
//! recursively in place, which allows `${x:${y}}`.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::ops::Range;

use crate::environment::Environment;
use crate::value::{Lookup, NumberStyle, Value, NULL_MARKER};

/// What a placeholder whose name resolves to nothing expands to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// The null marker `لاشيء`.
    #[default]
    RenderNull,
    /// The placeholder text itself, braces included.
    Verbatim,
}

impl MissingKeyPolicy {
    /// Parse `null` or `verbatim`, as accepted from the environment.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "null" | "render-null" => Some(MissingKeyPolicy::RenderNull),
            "verbatim" => Some(MissingKeyPolicy::Verbatim),
            _ => None,
        }
    }
}

/// Name resolution for placeholders.
pub trait InterpolationContext {
    fn lookup(&self, name: &str) -> Option<Value>;

    /// Resolve `a:b:c`: the head by name, each later segment as a field of
    /// the value before it.
    fn resolve(&self, segments: &[&str]) -> Option<Value> {
        let (head, rest) = segments.split_first()?;
        let mut value = self.lookup(head)?;
        for segment in rest {
            value = match value.field(segment) {
                Ok(Lookup::Found(next)) => next,
                _ => return None,
            };
        }
        Some(value)
    }
}

impl<S: BuildHasher> InterpolationContext for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl InterpolationContext for Environment {
    fn lookup(&self, name: &str) -> Option<Value> {
        Environment::lookup(self, name)
    }

    fn resolve(&self, segments: &[&str]) -> Option<Value> {
        self.resolve_path(segments)
    }
}

/// Whether `template` contains anything that could be a placeholder.
pub fn has_placeholder(template: &str) -> bool {
    template.contains("${") || template.contains("{{")
}

/// Remove one pair of straight or angled quotes around the whole template.
pub fn strip_quotes(template: &str) -> &str {
    for (open, close) in [('"', '"'), ('«', '»')] {
        if let Some(inner) = template
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner;
        }
    }
    template
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Interpolator {
    pub missing_key: MissingKeyPolicy,
    pub style: NumberStyle,
}

impl Interpolator {
    pub fn new(missing_key: MissingKeyPolicy) -> Self {
        Interpolator {
            missing_key,
            style: NumberStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    /// Strip surrounding quotes, then expand.
    pub fn process(&self, template: &str, context: &dyn InterpolationContext) -> String {
        self.expand(strip_quotes(template), context)
    }

    /// Expand every placeholder in `template`.
    pub fn expand(&self, template: &str, context: &dyn InterpolationContext) -> String {
        if !has_placeholder(template) {
            return template.to_owned();
        }
        let pass = Pass {
            template,
            closing: match_braces(template.as_bytes()),
            context,
            options: *self,
        };
        let mut out = String::with_capacity(template.len());
        pass.expand_range(0..template.len(), &mut out);
        out
    }
}

/// For every `{`, the index of its matching `}`; `usize::MAX` when unmatched.
fn match_braces(bytes: &[u8]) -> Vec<usize> {
    let mut closing = vec![usize::MAX; bytes.len()];
    let mut open = Vec::new();
    for (i, byte) in bytes.iter().enumerate() {
        match byte {
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    closing[start] = i;
                }
            }
            _ => {}
        }
    }
    closing
}

struct Pass<'a> {
    template: &'a str,
    closing: Vec<usize>,
    context: &'a dyn InterpolationContext,
    options: Interpolator,
}

impl Pass<'_> {
    fn close_of(&self, open: usize) -> Option<usize> {
        self.closing.get(open).copied().filter(|c| *c != usize::MAX)
    }

    fn expand_range(&self, range: Range<usize>, out: &mut String) {
        let bytes = self.template.as_bytes();
        let mut copied = range.start;
        let mut i = range.start;
        while i + 1 < range.end {
            let inner = match (bytes[i], bytes[i + 1]) {
                // Unclosed: the `${` stays as text and the scan goes on.
                (b'$', b'{') => self
                    .close_of(i + 1)
                    .filter(|c| *c < range.end)
                    .map(|close| (i + 2..close, close + 1)),
                (b'{', b'{') => self
                    .close_of(i + 1)
                    .filter(|c| c + 1 < range.end && bytes[c + 1] == b'}')
                    .map(|c| (i + 2..c, c + 2)),
                _ => None,
            };
            match inner {
                Some((inner, end)) => {
                    out.push_str(&self.template[copied..i]);
                    self.placeholder(inner, i..end, out);
                    i = end;
                    copied = end;
                }
                None => i += 1,
            }
        }
        out.push_str(&self.template[copied..range.end]);
    }

    /// Split the inside of a placeholder at colons outside nested braces.
    fn segments(&self, inner: Range<usize>) -> Vec<Range<usize>> {
        let bytes = self.template.as_bytes();
        let mut segments = Vec::new();
        let mut start = inner.start;
        let mut i = inner.start;
        while i < inner.end {
            match bytes[i] {
                b'{' => match self.close_of(i) {
                    Some(close) if close < inner.end => i = close,
                    _ => {}
                },
                b':' => {
                    segments.push(start..i);
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        segments.push(start..inner.end);
        segments
    }

    fn placeholder(&self, inner: Range<usize>, raw: Range<usize>, out: &mut String) {
        let segments = self.segments(inner);
        let names: Vec<&str> = segments
            .iter()
            .map(|r| self.template[r.clone()].trim())
            .collect();

        if !names.iter().any(|n| n.is_empty()) {
            if let Some(value) = self.context.resolve(&names) {
                if !matches!(value, Value::None) || names.len() == 1 {
                    out.push_str(&value.render(self.options.style));
                    return;
                }
            }
        }

        if let Some((default, path)) = segments.split_last().filter(|(_, path)| !path.is_empty()) {
            let path = &names[..path.len()];
            match self.context.resolve(path) {
                Some(value) if !matches!(value, Value::None) => {
                    out.push_str(&value.render(self.options.style));
                }
                _ => self.expand_range(default.clone(), out),
            }
            return;
        }

        match self.options.missing_key {
            MissingKeyPolicy::RenderNull => out.push_str(NULL_MARKER),
            MissingKeyPolicy::Verbatim => out.push_str(&self.template[raw]),
        }
    }
}
