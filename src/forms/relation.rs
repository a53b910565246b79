use crate::models;
use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;

pub const RATE_CHOICES: [i16; 5] = [1, 2, 3, 4, 5];

/// `None` when the field is absent, `Some(None)` when it is `null`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

fn narrow(rate: i64) -> Option<i16> {
    i16::try_from(rate)
        .ok()
        .filter(|rate| RATE_CHOICES.contains(rate))
}

fn rate_choice(rate: &Option<Option<i64>>) -> Result<(), serde_valid::validation::Error> {
    match rate {
        Some(Some(rate)) if narrow(*rate).is_none() => Err(
            serde_valid::validation::Error::Custom(format!("\"{}\" is not a valid choice.", rate)),
        ),
        _ => Ok(()),
    }
}

/// Partial update of the caller's own relation. Absent fields keep their value,
/// `"rate": null` withdraws the rating.
#[derive(Serialize, Deserialize, Debug, Default, Validate)]
pub struct RelationForm {
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(custom(rate_choice))]
    pub rate: Option<Option<i64>>,
}

impl RelationForm {
    /// Applies the form and reports whether `rate` changed.
    pub fn update(self, relation: &mut models::UserProductRelation) -> Result<bool, String> {
        let rate = match self.rate {
            Some(Some(rate)) => {
                let rate = narrow(rate)
                    .ok_or_else(|| format!("rate: \"{}\" is not a valid choice.", rate))?;
                Some(Some(rate))
            }
            Some(None) => Some(None),
            None => None,
        };

        if let Some(like) = self.like {
            relation.like = like;
        }

        if let Some(in_bookmarks) = self.in_bookmarks {
            relation.in_bookmarks = in_bookmarks;
        }

        match rate {
            Some(rate) if relation.rate != rate => {
                relation.rate = rate;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
