use std::fmt;
use std::str::FromStr;

/// Unique identifier for any combatant tracked by a game.
///
/// Ids are allocated at scene load and never reused, so a token that names a
/// removed combatant can never silently point at a newcomer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which zone of the battlefield a combatant belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Enemy,
    Ally,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::Enemy => Side::Ally,
            Side::Ally => Side::Enemy,
        }
    }
}

/// Stable reference to a combatant: its side plus its entity id.
///
/// Textual form is `side:id`, e.g. `enemy:3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetToken {
    pub side: Side,
    pub id: EntityId,
}

impl TargetToken {
    pub const fn new(side: Side, id: EntityId) -> Self {
        Self { side, id }
    }

    pub const fn enemy(id: EntityId) -> Self {
        Self::new(Side::Enemy, id)
    }

    pub const fn ally(id: EntityId) -> Self {
        Self::new(Side::Ally, id)
    }
}

impl fmt::Display for TargetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side, self.id.0)
    }
}

/// Error parsing a [`TargetToken`] from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed target token '{0}', expected side:id")]
pub struct TokenParseError(pub String);

impl FromStr for TargetToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TokenParseError(s.to_owned());
        let (side, id) = s.trim().split_once(':').ok_or_else(malformed)?;
        let side = side.parse::<Side>().map_err(|_| malformed())?;
        let id = id.parse::<u32>().map_err(|_| malformed())?;
        Ok(Self::new(side, EntityId(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_text_form() {
        let token = TargetToken::enemy(EntityId(3));
        assert_eq!(token.to_string(), "enemy:3");
        assert_eq!("enemy:3".parse::<TargetToken>(), Ok(token));
        assert_eq!(
            "Ally:12".parse::<TargetToken>(),
            Ok(TargetToken::ally(EntityId(12)))
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!("enemy".parse::<TargetToken>().is_err());
        assert!("boss:1".parse::<TargetToken>().is_err());
        assert!("ally:-1".parse::<TargetToken>().is_err());
    }
}
