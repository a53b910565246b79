use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Name,
    Price,
    Rating,
}

impl OrderField {
    pub fn column(&self) -> &'static str {
        match self {
            OrderField::Id => "p.id",
            OrderField::Name => "p.name",
            OrderField::Price => "p.price",
            OrderField::Rating => "p.rating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Query string of `GET /product`: `?price=26.00&search=book&ordering=-price,name`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub price: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ProductQuery {
    /// Exact price filter. An empty value means "no filter".
    pub fn price_filter(&self) -> Result<Option<Decimal>, String> {
        match self.price.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(price) => Decimal::from_str(price)
                .map(Some)
                .map_err(|_| format!("price: \"{}\" Enter a number.", price)),
        }
    }

    /// Search terms split on whitespace and commas; every term has to match.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|term| !term.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Requested ordering; unknown fields are dropped.
    pub fn order_by(&self) -> Vec<(OrderField, Direction)> {
        let mut order = vec![];
        for term in self.ordering.as_deref().unwrap_or_default().split(',') {
            let term = term.trim();
            let (name, direction) = match term.strip_prefix('-') {
                Some(name) => (name, Direction::Desc),
                None => (term, Direction::Asc),
            };
            let field = match name {
                "id" => OrderField::Id,
                "name" => OrderField::Name,
                "price" => OrderField::Price,
                "rating" => OrderField::Rating,
                _ => continue,
            };
            if order.iter().all(|(f, _)| *f != field) {
                order.push((field, direction));
            }
        }

        order
    }
}

/// Escapes LIKE wildcards so a term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');

    escaped
}
