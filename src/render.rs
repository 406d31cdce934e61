/*
Renderer seam.
The dispatcher hands a ProgressCard to a CardRenderer. Rasterising
(headless browser, image encoding) lives behind this trait; the
PayloadRenderer here produces the display-ready fields as JSON.
*/

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::dot_matrix::{self, DotTally};
use crate::error::RenderError;
use crate::models::{DotStatus, ProgressResult};

// Computed values for one card
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressCard {
    pub progress: ProgressResult,
    pub dots: Option<Vec<DotStatus>>, // only for the annual dot style
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub id: Uuid,
    pub title: String,
    pub percentage_text: String, // "42.5%"
    pub details: String,         // "3/7 days"
    pub bar_width: f64,          // 0..=100
    pub dots: Option<Vec<DotStatus>>,
    pub dot_tally: Option<DotTally>,
}

#[async_trait]
pub trait CardRenderer: Send + Sync {
    async fn render(&self, card: &ProgressCard) -> Result<RenderedCard, RenderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadRenderer;

#[async_trait]
impl CardRenderer for PayloadRenderer {
    async fn render(&self, card: &ProgressCard) -> Result<RenderedCard, RenderError> {
        render_payload(card)
    }
}

pub fn render_payload(card: &ProgressCard) -> Result<RenderedCard, RenderError> {
    let p = &card.progress;
    if !p.percentage.is_finite() {
        return Err(RenderError::InvalidPercentage(p.percentage));
    }

    Ok(RenderedCard {
        id: Uuid::new_v4(),
        title: p.title.clone(),
        percentage_text: format!("{:.1}%", p.percentage),
        details: format!("{}/{} {}", p.current_label, p.total_label, p.unit),
        bar_width: p.percentage.clamp(0.0, 100.0),
        dot_tally: card.dots.as_deref().map(dot_matrix::tally),
        dots: card.dots.clone(),
    })
}
