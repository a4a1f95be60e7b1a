/// The standard demographic dimensions collected by the survey form.
///
/// Records are not limited to these: any column name can act as a
/// dimension, these are just the ones the bundled poll profiles use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Age,
    Gender,
    Race,
    Income,
    Urbanity,
    Education,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Age,
        Dimension::Gender,
        Dimension::Race,
        Dimension::Income,
        Dimension::Urbanity,
        Dimension::Education,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Dimension::Age => "age",
            Dimension::Gender => "gender",
            Dimension::Race => "race",
            Dimension::Income => "income",
            Dimension::Urbanity => "urbanity",
            Dimension::Education => "education",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.to_str() == name)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Dimension;

    #[test]
    fn names_round_trip() {
        for dim in Dimension::ALL {
            assert_eq!(Dimension::from_name(dim.to_str()), Some(dim));
        }
        assert_eq!(Dimension::from_name("candidate"), None);
    }
}
