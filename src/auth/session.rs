/// Local view of the signed-in state. Held in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn { session_id: String },
}

impl Session {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::SignedIn { session_id } => Some(session_id),
            Self::SignedOut => None,
        }
    }

    pub fn activate(&mut self, session_id: impl Into<String>) {
        *self = Self::SignedIn {
            session_id: session_id.into(),
        };
    }

    pub fn sign_out(&mut self) {
        *self = Self::SignedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activate_and_sign_out() {
        let mut session = Session::default();
        assert!(!session.is_signed_in());

        session.activate("sess_42");
        assert!(session.is_signed_in());
        assert_eq!(session.session_id(), Some("sess_42"));

        session.sign_out();
        assert_eq!(session, Session::SignedOut);
    }
}
