//! Users Data

/// Profile Update Data
///
/// Only the fields that are present and non-empty are changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub(crate) fn normalised(self) -> Self {
        Self {
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            phone: non_empty(self.phone),
        }
    }
}

/// Treat blank strings the same as an absent value.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_dropped() {
        let update = ProfileUpdate {
            first_name: Some("  ".to_string()),
            last_name: Some(" Pérez ".to_string()),
            phone: None,
        }
        .normalised();

        assert_eq!(
            update,
            ProfileUpdate {
                first_name: None,
                last_name: Some("Pérez".to_string()),
                phone: None,
            }
        );
    }
}
