/// Requester identity handed over by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(String),
}

impl Identity {
    pub fn user(id: impl Into<String>) -> Self {
        Self::User(id.into())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::User(id) => Some(id),
            Self::Anonymous => None,
        }
    }

    pub fn require(&self) -> crate::Result<&str> {
        self.id().ok_or(crate::Error::Unauthenticated)
    }
}

impl From<Option<String>> for Identity {
    fn from(value: Option<String>) -> Self {
        value.map(Self::User).unwrap_or_default()
    }
}
