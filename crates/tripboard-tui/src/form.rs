//! Edit-form state: the draft point plus cursor, and the key handling
//! that turns typing into a `FormIntent`.

use chrono::{DateTime, Duration, Utc};
use strum::IntoEnumIterator;

use tripboard_core::model::find_destination;
use tripboard_core::{Destination, FormIntent, Key, Offer, OffersList, Point, PointType};

/// Upper bound for the typed base price.
const MAX_PRICE: u32 = 1_000_000;

/// Focusable form fields, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Destination,
    From,
    To,
    Price,
    Offers,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Type,
        Self::Destination,
        Self::From,
        Self::To,
        Self::Price,
        Self::Offers,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Destination => "Destination",
            Self::From => "From",
            Self::To => "To",
            Self::Price => "Price",
            Self::Offers => "Offers",
        }
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }
}

/// The draft behind one add/edit form.
#[derive(Debug, Clone)]
pub struct FormDraft {
    pub point: Point,
    pub is_new: bool,
    pub field: Field,
    pub offer_cursor: usize,
    pub error: Option<&'static str>,
    offers: OffersList,
    destinations: Vec<Destination>,
}

impl FormDraft {
    /// `None` starts a blank creation form at `now`.
    pub fn new(
        point: Option<&Point>,
        offers: &OffersList,
        destinations: &[Destination],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            point: point.cloned().unwrap_or_else(|| Point::blank(now)),
            is_new: point.is_none(),
            field: Field::Type,
            offer_cursor: 0,
            error: None,
            offers: offers.clone(),
            destinations: destinations.to_vec(),
        }
    }

    /// Throw away edits.
    pub fn reset(&mut self, point: &Point) {
        self.point = point.clone();
        self.offer_cursor = 0;
        self.error = None;
    }

    pub fn destination(&self) -> Option<&Destination> {
        find_destination(&self.destinations, self.point.destination.as_ref())
    }

    /// Offers available for the draft's current type.
    pub fn type_offers(&self) -> &[Offer] {
        self.offers.for_type(self.point.point_type)
    }

    pub fn is_offer_selected(&self, offer: &Offer) -> bool {
        self.point.offers.contains(&offer.id)
    }

    pub fn handle_key(&mut self, key: Key) -> Option<FormIntent> {
        match key {
            Key::Enter => match self.validate() {
                Ok(()) => Some(FormIntent::Submit(self.point.clone())),
                Err(message) => {
                    self.error = Some(message);
                    None
                }
            },
            Key::Char('x') => Some(FormIntent::Delete(self.point.clone())),
            Key::Char('r') => Some(FormIntent::Close),
            Key::Tab | Key::Down => {
                self.field = self.field.step(true);
                None
            }
            Key::BackTab | Key::Up => {
                self.field = self.field.step(false);
                None
            }
            Key::Left => {
                self.adjust(false);
                None
            }
            Key::Right => {
                self.adjust(true);
                None
            }
            Key::Char(' ') if self.field == Field::Offers => {
                self.toggle_offer();
                None
            }
            Key::Char(c) if self.field == Field::Price => {
                if let Some(digit) = c.to_digit(10) {
                    self.point.base_price = self
                        .point
                        .base_price
                        .saturating_mul(10)
                        .saturating_add(digit)
                        .min(MAX_PRICE);
                    self.error = None;
                }
                None
            }
            Key::Backspace if self.field == Field::Price => {
                self.point.base_price /= 10;
                None
            }
            _ => None,
        }
    }

    fn adjust(&mut self, forward: bool) {
        match self.field {
            Field::Type => self.cycle_type(forward),
            Field::Destination => self.cycle_destination(forward),
            Field::From | Field::To => {
                let hours = if forward { 1 } else { -1 };
                self.shift_date(Duration::hours(hours));
            }
            Field::Price => {}
            Field::Offers => {
                let len = self.type_offers().len();
                if len > 0 {
                    self.offer_cursor = if forward {
                        (self.offer_cursor + 1) % len
                    } else {
                        (self.offer_cursor + len - 1) % len
                    };
                }
            }
        }
        self.error = None;
    }

    /// Offers belong to a type, so switching type clears them.
    fn cycle_type(&mut self, forward: bool) {
        let types: Vec<PointType> = PointType::iter().collect();
        let index = types
            .iter()
            .position(|t| *t == self.point.point_type)
            .unwrap_or(0);
        let len = types.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.point.point_type = types[next];
        self.point.offers.clear();
        self.offer_cursor = 0;
    }

    fn cycle_destination(&mut self, forward: bool) {
        let len = self.destinations.len();
        if len == 0 {
            return;
        }
        let current = self
            .point
            .destination
            .as_ref()
            .and_then(|id| self.destinations.iter().position(|d| &d.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.point.destination = Some(self.destinations[next].id.clone());
    }

    /// Moving one end past the other drags the other end along.
    fn shift_date(&mut self, by: Duration) {
        let point = &mut self.point;
        if self.field == Field::From {
            point.date_from += by;
            if point.date_from > point.date_to {
                point.date_to = point.date_from;
            }
        } else {
            point.date_to += by;
            if point.date_to < point.date_from {
                point.date_from = point.date_to;
            }
        }
    }

    fn toggle_offer(&mut self) {
        let Some(id) = self
            .type_offers()
            .get(self.offer_cursor)
            .map(|offer| offer.id.clone())
        else {
            return;
        };
        if let Some(index) = self.point.offers.iter().position(|o| *o == id) {
            self.point.offers.remove(index);
        } else {
            self.point.offers.push(id);
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        if self.destination().is_none() {
            return Err("choose a destination");
        }
        if self.point.date_to < self.point.date_from {
            return Err("end is before start");
        }
        Ok(())
    }
}
