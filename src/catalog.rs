//! SIA agent catalog — the products shown on the ring.
//!
//! Catalog order is ring order. A catalog can come from the built-in lineup
//! or from a RON file holding a list of `AgentProduct`s.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::orbit::{Icon, ItemId, TimelineItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentCategory {
    Marketing,
    Hr,
    Sales,
}

impl AgentCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Marketing => "Marketing",
            Self::Hr => "HR",
            Self::Sales => "Sales",
        }
    }
}

/// One AI agent offered by SIA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProduct {
    pub id: ItemId,
    pub title: String,
    pub icon: Icon,
    pub category: AgentCategory,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("catalog contains no products")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<AgentProduct>,
}

impl Catalog {
    /// The default SIA lineup: two agents per business area.
    pub fn builtin() -> Self {
        let product = |id: ItemId,
                       title: &str,
                       glyph: &str,
                       category: AgentCategory,
                       tagline: &str,
                       description: &str,
                       highlights: &[&str]| AgentProduct {
            id,
            title: title.to_string(),
            icon: Icon::Glyph(glyph.to_string()),
            category,
            tagline: tagline.to_string(),
            description: description.to_string(),
            highlights: highlights.iter().map(|h| h.to_string()).collect(),
        };

        Self {
            products: vec![
                product(
                    1,
                    "Content Studio",
                    "✏",
                    AgentCategory::Marketing,
                    "On-brand copy for every channel",
                    "Drafts posts, newsletters and landing copy from a short brief, \
                     keeping tone and terminology consistent with your brand guide.",
                    &["Brand voice profiles", "Multi-channel drafts", "SEO suggestions"],
                ),
                product(
                    2,
                    "Campaign Analyst",
                    "📊",
                    AgentCategory::Marketing,
                    "Know which campaigns pay off",
                    "Reads campaign exports and summarizes reach, conversion and \
                     spend, flagging the channels that underperform.",
                    &["Upload CSV reports", "Weekly summaries", "Budget alerts"],
                ),
                product(
                    3,
                    "Talent Scout",
                    "🔍",
                    AgentCategory::Hr,
                    "Shortlists in minutes, not days",
                    "Screens uploaded resumes against the job profile and explains \
                     why each candidate made the shortlist.",
                    &["Resume parsing", "Explained rankings", "Bias checks"],
                ),
                product(
                    4,
                    "Onboarding Guide",
                    "🤝",
                    AgentCategory::Hr,
                    "Every new hire gets answers",
                    "Answers policy and process questions for new employees from your \
                     own handbook, around the clock.",
                    &["Handbook Q&A", "Checklists", "Escalation to HR"],
                ),
                product(
                    5,
                    "Lead Qualifier",
                    "🎯",
                    AgentCategory::Sales,
                    "Focus on leads that close",
                    "Scores inbound leads from form data and conversation history and \
                     routes hot leads to the right rep.",
                    &["Lead scoring", "CRM-ready notes", "Routing rules"],
                ),
                product(
                    6,
                    "Deal Coach",
                    "💬",
                    AgentCategory::Sales,
                    "A second opinion on every deal",
                    "Reviews call notes and proposals, suggests next steps and \
                     drafts follow-up emails.",
                    &["Call note review", "Objection handling", "Follow-up drafts"],
                ),
            ],
        }
    }

    pub fn from_products(products: Vec<AgentProduct>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        let catalog = Self { products };
        let dups = catalog.duplicate_ids();
        if !dups.is_empty() {
            log::warn!("catalog: duplicate product ids {:?}; only the first is selectable", dups);
        }
        Ok(catalog)
    }

    /// Parse a RON list of products.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let products: Vec<AgentProduct> = ron::from_str(text)?;
        Self::from_products(products)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&text)?;
        log::info!("catalog: loaded {} products from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn products(&self) -> &[AgentProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn first_id(&self) -> Option<ItemId> {
        self.products.first().map(|p| p.id)
    }

    pub fn find(&self, id: ItemId) -> Option<&AgentProduct> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    /// Start-up selection: `requested` when it names a product, else the
    /// first product.
    pub fn resolve_selection(&self, requested: Option<ItemId>) -> Option<ItemId> {
        match requested {
            Some(id) if self.find(id).is_some() => Some(id),
            Some(id) => {
                log::warn!("catalog: no product with id {}; starting on the first one", id);
                self.first_id()
            }
            None => self.first_id(),
        }
    }

    /// Project the catalog onto ring items, in catalog order.
    pub fn timeline_items(&self) -> Vec<TimelineItem> {
        self.products
            .iter()
            .map(|p| TimelineItem::new(p.id, p.title.clone(), p.icon.clone()))
            .collect()
    }

    /// Ids that occur more than once, in first-repeat order.
    pub fn duplicate_ids(&self) -> Vec<ItemId> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for p in &self.products {
            if !seen.insert(p.id) && !dups.contains(&p.id) {
                dups.push(p.id);
            }
        }
        dups
    }
}
