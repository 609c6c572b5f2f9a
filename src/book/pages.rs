//! Card content: the pages of the book.

use crate::error::{CardError, Result};

/// One page of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
pub struct PageContent {
    pub title: String,
    #[cfg_attr(feature = "config", serde(default))]
    pub paragraphs: Vec<String>,
    #[cfg_attr(feature = "config", serde(default))]
    pub signature: Option<String>,
}

impl PageContent {
    pub fn new(title: impl Into<String>, paragraphs: &[&str]) -> Self {
        Self {
            title: title.into(),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
            signature: None,
        }
    }

    pub fn signed(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

/// Ordered, non-empty collection of pages.
#[derive(Debug, Clone)]
pub struct Book {
    pages: Vec<PageContent>,
}

impl Book {
    pub fn new(pages: Vec<PageContent>) -> Result<Self> {
        if pages.is_empty() {
            return Err(CardError::config("the book needs at least one page"));
        }
        Ok(Self { pages })
    }

    /// The default four-page Christmas card.
    pub fn christmas() -> Self {
        Self {
            pages: vec![
                PageContent::new(
                    "Merry Christmas",
                    &[
                        "A small book for you,",
                        "to open slowly,",
                        "one page at a time.",
                    ],
                ),
                PageContent::new(
                    "For You",
                    &[
                        "This year brought long roads and short days,",
                        "and you were there for every one of them.",
                        "Thank you for the laughter and the patience.",
                    ],
                ),
                PageContent::new(
                    "My Wishes",
                    &[
                        "Warm lights in every window,",
                        "a full table and a quiet heart,",
                        "and a new year that treats you kindly.",
                    ],
                ),
                PageContent::new(
                    "Happy Holidays",
                    &[
                        "May the magic of these days",
                        "stay with you all year long.",
                    ],
                )
                .signed("With love"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// 1-based page lookup.
    pub fn page(&self, number: usize) -> Option<&PageContent> {
        number.checked_sub(1).and_then(|idx| self.pages.get(idx))
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::christmas()
    }
}
