//! Output and template macros shared by the presence crates.
//!
//! Templates live in `presence-messages`; these macros fill their `{key}` slots
//! and route the result to the terminal.

/// Fills the named `{key}` slots of a message template.
///
/// Slots with no matching argument are left as they are.
#[macro_export]
macro_rules! msg_format {
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        [$((concat!("{", stringify!($key), "}"), $value.to_string())),+]
            .iter()
            .fold($template.to_string(), |text, (slot, value)| text.replace(slot, value))
    };
}

#[macro_export]
macro_rules! presence_println {
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! presence_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! presence_success {
    ($($arg:tt)*) => {
        println!("✓ {}", format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_msg_format_fills_named_slots() {
        let out = msg_format!("{key} = {old} => {new}", key = "a.b", old = "x", new = 2);
        assert_eq!(out, "a.b = x => 2");
    }

    #[test]
    fn test_msg_format_repeated_slot() {
        let out = msg_format!("{path} -> {path}", path = "a.b");
        assert_eq!(out, "a.b -> a.b");
    }

    #[test]
    fn test_msg_format_leaves_unknown_slots() {
        let out = msg_format!("{known} {unknown}", known = "yes");
        assert_eq!(out, "yes {unknown}");
    }
}
