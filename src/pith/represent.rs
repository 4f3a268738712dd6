//! Text rendering of piths for cause strings

use super::value::Pith;

/// Renders piths into cause strings.
pub trait Represent: Send + Sync {
    /// Host-style representation of a pith.
    fn represent(&self, pith: &Pith) -> String;

    /// Runtime type name followed by the representation, e.g. `int -5`.
    fn describe(&self, pith: &Pith) -> String {
        format!("{} {}", pith.type_name(), self.represent(pith))
    }
}

/// Nesting level beyond which containers render as `[...]`.
pub const DEFAULT_MAX_LEVEL: usize = 6;

/// Default representer truncating long representations.
///
/// Rendering stops once the length budget is spent and containers nested
/// deeper than `max_level` are elided, so cost is bounded by the budget and
/// the level, not by the size of the pith.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatingRepr {
    max_len: Option<usize>,
    max_level: usize,
}

impl TruncatingRepr {
    /// Truncate representations longer than `max_len` characters.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Never truncate by length.
    pub fn unbounded() -> Self {
        Self {
            max_len: None,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }

    /// Elide containers nested deeper than `max_level`.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }
}

impl Represent for TruncatingRepr {
    fn represent(&self, pith: &Pith) -> String {
        let mut writer = ReprWriter::new(self.max_len, self.max_level);
        writer.write(pith, 0);
        writer.finish()
    }
}

/// Untruncated representation, eliding containers past [`DEFAULT_MAX_LEVEL`].
pub fn repr(pith: &Pith) -> String {
    TruncatingRepr::unbounded().represent(pith)
}

/// Accumulates a representation until `budget` characters are exceeded.
struct ReprWriter {
    out: String,
    chars: usize,
    budget: Option<usize>,
    max_level: usize,
}

impl ReprWriter {
    fn new(budget: Option<usize>, max_level: usize) -> Self {
        Self {
            out: String::new(),
            chars: 0,
            budget,
            max_level,
        }
    }

    fn full(&self) -> bool {
        self.budget.is_some_and(|budget| self.chars > budget)
    }

    fn push(&mut self, c: char) {
        if !self.full() {
            self.out.push(c);
            self.chars += 1;
        }
    }

    fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.full() {
                return;
            }
            self.push(c);
        }
    }

    fn finish(self) -> String {
        let Some(budget) = self.budget else {
            return self.out;
        };
        if self.chars <= budget {
            return self.out;
        }
        let keep = budget.saturating_sub(3);
        let mut out: String = self.out.chars().take(keep).collect();
        out.push_str("...");
        out
    }

    fn write(&mut self, pith: &Pith, level: usize) {
        if self.full() {
            return;
        }
        if level >= self.max_level && is_populated_container(pith) {
            self.write_elided(pith);
            return;
        }

        match pith {
            Pith::None => self.push_str("None"),
            Pith::Bool(true) => self.push_str("True"),
            Pith::Bool(false) => self.push_str("False"),
            Pith::Int(i) => self.push_str(&i.to_string()),
            Pith::Float(f) => self.push_str(&float_repr(*f)),
            Pith::Str(s) => self.write_str(s),
            Pith::Bytes(bytes) => self.write_bytes(bytes),
            Pith::List(items) => self.write_seq("[", items, "]", level),
            Pith::Tuple(items) if items.len() == 1 => {
                self.push('(');
                self.write(&items[0], level + 1);
                self.push_str(",)");
            }
            Pith::Tuple(items) => self.write_seq("(", items, ")", level),
            Pith::Set(items) if items.is_empty() => self.push_str("set()"),
            Pith::Set(items) => self.write_seq("{", items, "}", level),
            Pith::FrozenSet(items) if items.is_empty() => self.push_str("frozenset()"),
            Pith::FrozenSet(items) => self.write_seq("frozenset({", items, "})", level),
            Pith::Dict(entries) => {
                self.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if self.full() {
                        return;
                    }
                    if i > 0 {
                        self.push_str(", ");
                    }
                    self.write(key, level + 1);
                    self.push_str(": ");
                    self.write(value, level + 1);
                }
                self.push('}');
            }
            Pith::Type(class) => {
                self.push_str("<class '");
                self.push_str(&class.display_name());
                self.push_str("'>");
            }
            Pith::Object(instance) => {
                self.push_str(instance.class().name());
                if level >= self.max_level && !instance.attrs().is_empty() {
                    self.push_str("(...)");
                    return;
                }
                self.push('(');
                for (i, (name, value)) in instance.attrs().iter().enumerate() {
                    if self.full() {
                        return;
                    }
                    if i > 0 {
                        self.push_str(", ");
                    }
                    self.push_str(name);
                    self.push('=');
                    self.write(value, level + 1);
                }
                self.push(')');
            }
        }
    }

    fn write_elided(&mut self, pith: &Pith) {
        let elided = match pith {
            Pith::List(_) => "[...]",
            Pith::Tuple(_) => "(...)",
            Pith::Set(_) | Pith::Dict(_) => "{...}",
            Pith::FrozenSet(_) => "frozenset({...})",
            _ => "",
        };
        self.push_str(elided);
    }

    fn write_seq(&mut self, open: &str, items: &[Pith], close: &str, level: usize) {
        self.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if self.full() {
                return;
            }
            if i > 0 {
                self.push_str(", ");
            }
            self.write(item, level + 1);
        }
        self.push_str(close);
    }

    /// Single quotes unless the text holds a single quote and no double quote.
    fn write_str(&mut self, s: &str) {
        let quote = host_quote(s.contains('\''), s.contains('"'));
        self.push(quote);
        for c in s.chars() {
            if self.full() {
                return;
            }
            match c {
                '\\' => self.push_str("\\\\"),
                c if c == quote => {
                    self.push('\\');
                    self.push(c);
                }
                '\n' => self.push_str("\\n"),
                '\r' => self.push_str("\\r"),
                '\t' => self.push_str("\\t"),
                c if c.is_control() => self.push_str(&format!("\\x{:02x}", c as u32)),
                c => self.push(c),
            }
        }
        self.push(quote);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let quote = host_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
        self.push('b');
        self.push(quote);
        for &b in bytes {
            if self.full() {
                return;
            }
            match b {
                b'\\' => self.push_str("\\\\"),
                b if b as char == quote => {
                    self.push('\\');
                    self.push(quote);
                }
                b'\n' => self.push_str("\\n"),
                0x20..=0x7e => self.push(b as char),
                _ => self.push_str(&format!("\\x{:02x}", b)),
            }
        }
        self.push(quote);
    }
}

fn is_populated_container(pith: &Pith) -> bool {
    pith.items().is_some_and(|items| !items.is_empty())
        || pith.entries().is_some_and(|entries| !entries.is_empty())
}

fn host_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

fn float_repr(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let text = if f > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}
