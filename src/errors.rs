#![allow(missing_docs)]

//! Error handling of the whole crate, via `error_chain`.
//!
//! Additionally provides the `try_w!` family of macros, which are used
//! inside toolkit callbacks that have no way of returning an error.



error_chain! {
    foreign_links {
        Alsa(alsa::Error) #[cfg(feature = "alsa-backend")];
        Glib(glib::Error) #[cfg(feature = "gtk-ui")];
        IO(std::io::Error);
        ParseFloat(std::num::ParseFloatError);
        ParseInt(std::num::ParseIntError);
        Xdg(xdg::BaseDirectoriesError);
    }

    errors {
        IniParse(line: usize, msg: String) {
            description("malformed configuration file")
            display("Malformed configuration file at line {}: {}", line, msg)
        }

        MissingPref(key: String) {
            description("preference not set")
            display("Preference '{}' is not set", key)
        }

        InvalidPref(key: String, value: String) {
            description("invalid preference value")
            display("Preference '{}' has invalid value '{}'", key, value)
        }

        DialogClosed {
            description("preferences dialog is not open")
            display("Preferences dialog is not open")
        }

        NoMixers(card_index: i32) {
            description("card has no mixer controls")
            display("Card {} has no mixer controls", card_index)
        }
    }
}



/// Evaluate a `Result`, logging the error with `warn!` and returning
/// `()` from the enclosing function on failure.
#[macro_export]
macro_rules! try_w {
    ($expr:expr) => {
        $crate::try_wr!($expr, ())
    };
    ($expr:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::try_wr!($expr, (), $fmt, $($arg)+)
    };
    ($expr:expr, $fmt:expr) => {
        $crate::try_wr!($expr, (), $fmt)
    }
}


/// Like `try_w!`, but returns the given value on failure.
#[macro_export]
macro_rules! try_wr {
    ($expr:expr, $ret:expr) => (match $expr {
        ::std::result::Result::Ok(val) => val,
        ::std::result::Result::Err(err) => {
            warn!("{}", err);
            return $ret;
        },
    });
    ($expr:expr, $ret:expr, $fmt:expr) => (match $expr {
        ::std::result::Result::Ok(val) => val,
        ::std::result::Result::Err(err) => {
            warn!("Original error: {}", err);
            warn!($fmt);
            return $ret;
        },
    });
    ($expr:expr, $ret:expr, $fmt:expr, $($arg:tt)+) => (match $expr {
        ::std::result::Result::Ok(val) => val,
        ::std::result::Result::Err(err) => {
            warn!("Original error: {}", err);
            warn!($fmt, $($arg)+);
            return $ret;
        },
    })
}


/// Evaluate a `Result`, silently returning the given value on failure.
#[macro_export]
macro_rules! try_r {
    ($expr:expr, $ret:expr) => (match $expr {
        ::std::result::Result::Ok(val) => val,
        ::std::result::Result::Err(_) => {
            return $ret;
        },
    });
}
