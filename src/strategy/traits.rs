use std::fmt::Debug;

use crate::model::round::Decision;

/// What a seat sees before deciding: its own latest recorded round.
/// Other roles' books are hidden, which is the whole point of the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatView {
    pub week: u32,
    pub stock: u32,
    pub backorder: u32,
    pub incoming_order: u32,
    pub incoming_shipment: u32,
}

impl SeatView {
    /// Everything currently owed downstream.
    pub fn obligation(&self) -> u32 {
        self.backorder + self.incoming_order
    }

    /// The most that can be shipped this week.
    pub fn shippable(&self) -> u32 {
        self.obligation().min(self.stock)
    }
}

/// Decision logic for an unattended seat.
///
/// `Send + Sync` so policies can drive submissions from worker threads.
pub trait DecisionPolicy: Debug + Send + Sync {
    /// Produce this week's order and shipment from the seat's view.
    fn decide(&mut self, view: &SeatView) -> Decision;
}
