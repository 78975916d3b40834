#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    NotMember(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Unknown(value.into())
    }
}

/// Returns true when a storage error comes from a UNIQUE index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(e) if e.is_unique_violation())
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($entity:literal $(,)?) => {
        return Err($crate::Error::NotFound($entity.to_owned()))
    };
}

#[macro_export]
macro_rules! not_member {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotMember($msg.to_owned()))
    };
}

#[macro_export]
macro_rules! conflict {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Conflict($msg.to_owned()))
    };
}

#[macro_export]
macro_rules! forbidden {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Forbidden($msg.to_owned()))
    };
}

#[macro_export]
macro_rules! invalid {
    ($field:literal, $msg:literal $(,)?) => {
        return Err($crate::Error::Invalid {
            field: $field,
            message: $msg.to_owned(),
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(found: bool) -> Result<()> {
        if !found {
            not_found!("recipe");
        }

        Ok(())
    }

    fn add(exists: bool) -> Result<()> {
        if exists {
            conflict!("already in list");
        }

        Ok(())
    }

    #[test]
    fn macros_build_expected_messages() {
        assert!(find(true).is_ok());
        assert_eq!(find(false).unwrap_err().to_string(), "recipe not found");
        assert_eq!(add(true).unwrap_err().to_string(), "already in list");
    }
}
