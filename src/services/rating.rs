use crate::db;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RatingError {
    #[error("product {0} not found")]
    ProductNotFound(i32),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Mean of the present rates rounded half-up to two fraction digits.
/// `None` when nobody rated.
pub fn compute_rating<I>(rates: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Option<i16>>,
{
    let (sum, count) = rates
        .into_iter()
        .flatten()
        .fold((0i64, 0i64), |(sum, count), rate| (sum + rate as i64, count + 1));

    if count == 0 {
        return None;
    }

    let mean = Decimal::from(sum) / Decimal::from(count);
    Some(mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Recomputes and stores the rating of a product from all of its relations.
///
/// Called by the relation write path after a `rate` change has been persisted.
#[tracing::instrument(name = "Recalculate product rating.", skip(pool))]
pub async fn set_rating(pool: &PgPool, product_id: i32) -> Result<Option<Decimal>, RatingError> {
    let rates = db::relation::fetch_rates_by_product(pool, product_id)
        .await
        .map_err(RatingError::Storage)?;

    let rating = compute_rating(rates);

    match db::product::update_rating(pool, product_id, rating)
        .await
        .map_err(RatingError::Storage)?
    {
        true => {
            tracing::info!("Product {} rating set to {:?}", product_id, rating);
            Ok(rating)
        }
        false => {
            tracing::error!("Rating recalculation for missing product {}", product_id);
            Err(RatingError::ProductNotFound(product_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn mean_is_rounded_half_up() {
        let rating = compute_rating([Some(5), Some(5), Some(4)]).unwrap();
        assert_eq!(rating, dec("4.67"));
        assert_eq!(format!("{:.2}", rating), "4.67");
    }

    #[test]
    fn absent_rates_are_excluded() {
        let rating = compute_rating([Some(3), Some(4), None]).unwrap();
        assert_eq!(format!("{:.2}", rating), "3.50");
    }

    #[test]
    fn no_rates_means_no_rating() {
        assert_eq!(compute_rating(Vec::<Option<i16>>::new()), None);
        assert_eq!(compute_rating([None, None]), None);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 1,1,1,1,1,1,1,2 -> 1.125
        let mut rates = vec![Some(1); 7];
        rates.push(Some(2));
        assert_eq!(compute_rating(rates), Some(dec("1.13")));
    }

    #[test]
    fn thirds_round_down() {
        // 4,4,5 -> 4.333..
        assert_eq!(compute_rating([Some(4), Some(4), Some(5)]), Some(dec("4.33")));
    }

    #[test]
    fn single_rate_is_exact() {
        let rating = compute_rating([Some(2)]).unwrap();
        assert_eq!(rating, dec("2"));
        assert_eq!(format!("{:.2}", rating), "2.00");
    }
}
