//! Immutable movement log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{MovementId, ProductCode};

/// What kind of change a movement records.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementCategory {
    Sale,
    Purchase,
    Relocation,
    Adjustment,
}

impl core::fmt::Display for MovementCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            MovementCategory::Sale => "SALE",
            MovementCategory::Purchase => "PURCHASE",
            MovementCategory::Relocation => "RELOCATION",
            MovementCategory::Adjustment => "ADJUSTMENT",
        };
        f.write_str(name)
    }
}

/// Payload of a movement.
///
/// A movement carries either a quantity pair or a location pair, never both.
/// The tag keeps the two from being conflated when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovementChange {
    /// Stock quantity changed: `after = before + delta`.
    Quantity { delta: i64, before: i64, after: i64 },
    /// Product moved between storage locations; quantity untouched.
    Location { from: String, to: String },
}

/// One entry of the append-only audit trail. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub code: ProductCode,
    pub category: MovementCategory,
    pub change: MovementChange,
    pub recorded_at: DateTime<Utc>,
}

impl Movement {
    pub fn quantity(
        id: MovementId,
        code: ProductCode,
        category: MovementCategory,
        delta: i64,
        before: i64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(category != MovementCategory::Relocation);
        Self {
            id,
            code,
            category,
            change: MovementChange::Quantity {
                delta,
                before,
                after: before + delta,
            },
            recorded_at,
        }
    }

    pub fn relocation(
        id: MovementId,
        code: ProductCode,
        from: impl Into<String>,
        to: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            category: MovementCategory::Relocation,
            change: MovementChange::Location {
                from: from.into(),
                to: to.into(),
            },
            recorded_at,
        }
    }

    /// The quantity this movement left behind, if it carried one.
    pub fn quantity_after(&self) -> Option<i64> {
        match self.change {
            MovementChange::Quantity { after, .. } => Some(after),
            MovementChange::Location { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn code() -> ProductCode {
        ProductCode::parse("P-001").unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn quantity_movement_computes_after_from_before_and_delta() {
        let m = Movement::quantity(
            MovementId::new(1),
            code(),
            MovementCategory::Sale,
            -5,
            20,
            at(),
        );
        assert_eq!(m.quantity_after(), Some(15));
    }

    #[test]
    fn relocation_carries_locations_not_quantities() {
        let m = Movement::relocation(MovementId::new(2), code(), "VEST01", "VEST02", at());
        assert_eq!(m.category, MovementCategory::Relocation);
        assert_eq!(m.quantity_after(), None);
    }

    #[test]
    fn change_payload_serializes_tagged() {
        let m = Movement::relocation(MovementId::new(3), code(), "A01", "B02", at());
        let json = serde_json::to_string(&m.change).unwrap();
        assert!(json.contains(r#""kind":"location""#), "{json}");

        let back: MovementChange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m.change);
    }
}
