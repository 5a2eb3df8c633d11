use std::collections::HashMap;
use std::fmt;

use hikido_ipc::{Command, Corner, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: Key,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub cmd: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        cmd: false,
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub fn cmd() -> Self {
        Self {
            cmd: true,
            ..Self::NONE
        }
    }

    pub fn with_shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    /// Builds a modifier set from names such as `["cmd", "alt"]`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut modifiers = Self::default();
        for name in names {
            modifiers.set(name.as_ref())?;
        }
        Ok(modifiers)
    }

    fn set(&mut self, name: &str) -> Result<(), String> {
        match name.to_lowercase().as_str() {
            "cmd" | "super" | "command" => self.cmd = true,
            "alt" | "opt" | "option" => self.alt = true,
            "ctrl" | "control" => self.ctrl = true,
            "shift" => self.shift = true,
            _ => return Err(format!("Unknown modifier: {}", name)),
        }
        Ok(())
    }

    fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.cmd {
            names.push("cmd");
        }
        if self.alt {
            names.push("alt");
        }
        if self.ctrl {
            names.push("ctrl");
        }
        if self.shift {
            names.push("shift");
        }
        names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Letters, digits and punctuation, stored lowercase
    Char(char),
    Return,
    Tab,
    Space,
    Delete,
    Escape,
    Left,
    Right,
    Up,
    Down,
    /// The § key on ISO keyboards
    Section,
    F(u8),
}

impl Key {
    pub fn parse(name: &str) -> Result<Self, String> {
        let lower = name.to_lowercase();
        let key = match lower.as_str() {
            "return" | "enter" => Key::Return,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "delete" | "backspace" => Key::Delete,
            "escape" | "esc" => Key::Escape,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "section" | "§" => Key::Section,
            "minus" => Key::Char('-'),
            "equal" => Key::Char('='),
            "leftbracket" => Key::Char('['),
            "rightbracket" => Key::Char(']'),
            "backslash" => Key::Char('\\'),
            "semicolon" => Key::Char(';'),
            "quote" => Key::Char('\''),
            "comma" => Key::Char(','),
            "period" => Key::Char('.'),
            "slash" => Key::Char('/'),
            "grave" => Key::Char('`'),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Key::Char(c),
                    _ => parse_function_key(other)
                        .ok_or_else(|| format!("Unknown key: {}", name))?,
                }
            }
        };
        Ok(key)
    }
}

fn parse_function_key(name: &str) -> Option<Key> {
    let n: u8 = name.strip_prefix('f')?.parse().ok()?;
    (1..=12).contains(&n).then_some(Key::F(n))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => match c {
                '-' => f.write_str("minus"),
                '=' => f.write_str("equal"),
                '[' => f.write_str("leftbracket"),
                ']' => f.write_str("rightbracket"),
                '\\' => f.write_str("backslash"),
                ';' => f.write_str("semicolon"),
                '\'' => f.write_str("quote"),
                ',' => f.write_str("comma"),
                '.' => f.write_str("period"),
                '/' => f.write_str("slash"),
                '`' => f.write_str("grave"),
                c => write!(f, "{}", c),
            },
            Key::Return => f.write_str("return"),
            Key::Tab => f.write_str("tab"),
            Key::Space => f.write_str("space"),
            Key::Delete => f.write_str("delete"),
            Key::Escape => f.write_str("escape"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Section => f.write_str("section"),
            Key::F(n) => write!(f, "f{}", n),
        }
    }
}

pub fn parse_hotkey(key_str: &str) -> Result<Hotkey, String> {
    if key_str.is_empty() {
        return Err("Empty key string".to_string());
    }
    // A trailing '-' is the minus key itself, e.g. "cmd--"
    let (prefix, key_part) = match key_str.strip_suffix("--") {
        Some(prefix) => (prefix, "minus"),
        None => match key_str.rsplit_once('-') {
            Some((prefix, key)) => (prefix, key),
            None => ("", key_str),
        },
    };

    let mut modifiers = Modifiers::default();
    for part in prefix.split('-').filter(|p| !p.is_empty()) {
        modifiers.set(part)?;
    }

    Ok(Hotkey {
        key: Key::parse(key_part)?,
        modifiers,
    })
}

pub fn format_hotkey(hotkey: &Hotkey) -> String {
    let key = hotkey.key.to_string();
    let mut parts: Vec<&str> = hotkey.modifiers.names();
    parts.push(&key);
    parts.join("-")
}

/// Hotkey to command table.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    bindings: HashMap<Hotkey, Command>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock layout: placement on hyper plus arrows or vim keys,
    /// quadrants on q/w/a/s, window cycling on cmd-escape.
    pub fn defaults(hyper: Modifiers) -> Self {
        let mut bindings = Self::new();
        let hyper_shift = hyper.with_shift();

        let place = |direction| Command::Place { direction };
        let corner = |corner| Command::PlaceCorner { corner };

        let table = [
            (Key::Left, hyper, place(Direction::Left)),
            (Key::Char('j'), hyper, place(Direction::Left)),
            (Key::Right, hyper, place(Direction::Right)),
            (Key::Char('l'), hyper, place(Direction::Right)),
            (Key::Up, hyper, place(Direction::Up)),
            (Key::Char('i'), hyper, place(Direction::Up)),
            (Key::Down, hyper, place(Direction::Down)),
            (Key::Char('k'), hyper, place(Direction::Down)),
            (Key::Char('q'), hyper, corner(Corner::TopLeft)),
            (Key::Char('w'), hyper, corner(Corner::TopRight)),
            (Key::Char('a'), hyper, corner(Corner::BottomLeft)),
            (Key::Char('s'), hyper, corner(Corner::BottomRight)),
            (Key::Return, hyper, Command::ToggleMaximize),
            (Key::Return, hyper_shift, Command::ToggleFullscreen),
            (Key::Tab, hyper, Command::SendToNextScreen),
            (Key::Delete, hyper, Command::MinimizeFocused),
            (Key::Char('p'), hyper, Command::WindowInfo),
            (Key::Char('a'), hyper_shift, Command::ToggleMouseAction),
            (Key::Char('m'), hyper, Command::PointerScreen),
            (Key::Char('.'), hyper, Command::ListScreenWindows),
            (Key::Char('h'), Modifiers::cmd(), Command::HideApp { all: false }),
            (Key::Escape, Modifiers::cmd(), Command::CycleWindows { reverse: false }),
            (
                Key::Escape,
                Modifiers::cmd().with_shift(),
                Command::CycleWindows { reverse: true },
            ),
        ];

        for (key, modifiers, command) in table {
            bindings.insert(Hotkey { key, modifiers }, command);
        }
        bindings
    }

    pub fn insert(&mut self, hotkey: Hotkey, command: Command) -> Option<Command> {
        self.bindings.insert(hotkey, command)
    }

    pub fn bind(&mut self, key_str: &str, command: Command) -> Result<(), String> {
        let hotkey = parse_hotkey(key_str)?;
        tracing::info!("Binding {} to {}", key_str, command.label());
        self.bindings.insert(hotkey, command);
        Ok(())
    }

    pub fn unbind(&mut self, key_str: &str) -> Result<(), String> {
        let hotkey = parse_hotkey(key_str)?;
        if self.bindings.remove(&hotkey).is_none() {
            return Err(format!("Key is not bound: {}", key_str));
        }
        tracing::info!("Unbound {}", key_str);
        Ok(())
    }

    pub fn lookup(&self, key_str: &str) -> Result<Option<&Command>, String> {
        let hotkey = parse_hotkey(key_str)?;
        Ok(self.bindings.get(&hotkey))
    }

    /// All bindings, sorted by formatted key.
    pub fn list(&self) -> Vec<(String, Command)> {
        let mut list: Vec<(String, Command)> = self
            .bindings
            .iter()
            .map(|(hotkey, cmd)| (format_hotkey(hotkey), cmd.clone()))
            .collect();
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hyper() -> Modifiers {
        Modifiers::from_names(&["cmd", "alt", "ctrl"]).unwrap()
    }

    #[test]
    fn test_parse_simple_key() {
        let hotkey = parse_hotkey("a").unwrap();
        assert_eq!(hotkey.key, Key::Char('a'));
        assert_eq!(hotkey.modifiers, Modifiers::NONE);
    }

    #[test]
    fn test_parse_multiple_modifiers() {
        let hotkey = parse_hotkey("cmd-shift-a").unwrap();
        assert_eq!(hotkey.key, Key::Char('a'));
        assert!(hotkey.modifiers.cmd);
        assert!(hotkey.modifiers.shift);
        assert!(!hotkey.modifiers.alt);
        assert!(!hotkey.modifiers.ctrl);
    }

    #[test]
    fn test_parse_modifier_aliases() {
        assert!(parse_hotkey("super-a").unwrap().modifiers.cmd);
        assert!(parse_hotkey("command-a").unwrap().modifiers.cmd);
        assert!(parse_hotkey("opt-a").unwrap().modifiers.alt);
        assert!(parse_hotkey("option-a").unwrap().modifiers.alt);
        assert!(parse_hotkey("control-a").unwrap().modifiers.ctrl);
    }

    #[test]
    fn test_parse_case_insensitive() {
        let hotkey = parse_hotkey("CMD-Alt-Ctrl-Return").unwrap();
        assert_eq!(hotkey.modifiers, hyper());
        assert_eq!(hotkey.key, Key::Return);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(parse_hotkey("enter").unwrap().key, Key::Return);
        assert_eq!(parse_hotkey("backspace").unwrap().key, Key::Delete);
        assert_eq!(parse_hotkey("esc").unwrap().key, Key::Escape);
        assert_eq!(parse_hotkey("§").unwrap().key, Key::Section);
        assert_eq!(parse_hotkey("cmd-section").unwrap().key, Key::Section);
        assert_eq!(parse_hotkey("f12").unwrap().key, Key::F(12));
        assert_eq!(parse_hotkey("period").unwrap().key, Key::Char('.'));
    }

    #[test]
    fn test_parse_trailing_minus() {
        let hotkey = parse_hotkey("cmd--").unwrap();
        assert_eq!(hotkey.key, Key::Char('-'));
        assert!(hotkey.modifiers.cmd);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_hotkey("").is_err());
        assert!(parse_hotkey("cmd-unknownkey").is_err());
        assert!(parse_hotkey("hyper-a").is_err());
        assert!(parse_hotkey("f13").is_err());
    }

    #[test]
    fn test_format_hotkey_canonical_order() {
        let hotkey = parse_hotkey("shift-ctrl-alt-cmd-left").unwrap();
        assert_eq!(format_hotkey(&hotkey), "cmd-alt-ctrl-shift-left");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for key in ["cmd-alt-ctrl-return", "cmd-h", "alt-comma", "ctrl-f5", "section"] {
            assert_eq!(format_hotkey(&parse_hotkey(key).unwrap()), key);
        }
    }

    #[test]
    fn test_default_bindings() {
        let bindings = Bindings::defaults(hyper());
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-left").unwrap(),
            Some(&Command::Place {
                direction: Direction::Left
            })
        );
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-k").unwrap(),
            Some(&Command::Place {
                direction: Direction::Down
            })
        );
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-shift-return").unwrap(),
            Some(&Command::ToggleFullscreen)
        );
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-a").unwrap(),
            Some(&Command::PlaceCorner {
                corner: Corner::BottomLeft
            })
        );
        assert_eq!(
            bindings.lookup("cmd-h").unwrap(),
            Some(&Command::HideApp { all: false })
        );
        assert_eq!(
            bindings.lookup("cmd-escape").unwrap(),
            Some(&Command::CycleWindows { reverse: false })
        );
        assert_eq!(
            bindings.lookup("cmd-shift-esc").unwrap(),
            Some(&Command::CycleWindows { reverse: true })
        );
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-m").unwrap(),
            Some(&Command::PointerScreen)
        );
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-period").unwrap(),
            Some(&Command::ListScreenWindows)
        );
        assert_eq!(bindings.lookup("cmd-alt-ctrl-z").unwrap(), None);
    }

    #[test]
    fn test_bind_overrides_and_unbind() {
        let mut bindings = Bindings::defaults(hyper());
        let count = bindings.len();

        bindings
            .bind("ctrl-alt-cmd-left", Command::ToggleMaximize)
            .unwrap();
        assert_eq!(bindings.len(), count);
        assert_eq!(
            bindings.lookup("cmd-alt-ctrl-left").unwrap(),
            Some(&Command::ToggleMaximize)
        );

        bindings.unbind("cmd-alt-ctrl-left").unwrap();
        assert_eq!(bindings.lookup("cmd-alt-ctrl-left").unwrap(), None);
        assert!(bindings.unbind("cmd-alt-ctrl-left").is_err());
    }

    #[test]
    fn test_list_is_sorted() {
        let mut bindings = Bindings::new();
        bindings.bind("cmd-h", Command::HideApp { all: false }).unwrap();
        bindings.bind("alt-a", Command::ToggleMouseAction).unwrap();

        let keys: Vec<String> = bindings.list().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alt-a", "cmd-h"]);
    }
}
