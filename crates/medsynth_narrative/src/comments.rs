//! Professional comment synthesis and runtime comment drafts.

use chrono::{Duration, NaiveDateTime};
use medsynth_core::documents::sort_newest_first;
use medsynth_core::rng::{chance, pick};
use medsynth_core::{Comment, Profession, Topic};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::templates::{comment_templates, COMMENT_SUFFIXES, DOCTOR_SURNAMES, STAFF_FIRST_NAMES, STAFF_LAST_NAMES};

#[derive(Debug, Clone, PartialEq)]
pub struct CommentSynthesizer {
    pub lookback_days: i64,
    /// Chance of appending a generic recommendation sentence.
    pub suffix_chance: f64,
}

impl Default for CommentSynthesizer {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            suffix_chance: 0.4,
        }
    }
}

impl CommentSynthesizer {
    /// `count` comments dated across the lookback ending at `now`. Each keeps
    /// `now`'s time of day. Ids follow ascending time; the result is newest first.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, patient_id: &str, count: usize, now: NaiveDateTime) -> Vec<Comment> {
        let start = now - Duration::days(self.lookback_days);
        let mut stamps: Vec<NaiveDateTime> = (0..count)
            .map(|_| start + Duration::days(rng.gen_range(0..=self.lookback_days)))
            .collect();
        stamps.sort();

        let mut comments: Vec<Comment> = stamps
            .into_iter()
            .enumerate()
            .map(|(i, timestamp)| {
                let profession = pick(rng, Profession::ALL);
                let author = author_name(rng, profession);
                let topic = pick(rng, Topic::ALL);
                let text = self.text(rng, topic);
                Comment {
                    id: Comment::id_for(i + 1),
                    patient_id: patient_id.to_string(),
                    timestamp,
                    author,
                    profession,
                    topic,
                    text,
                }
            })
            .collect();
        sort_newest_first(&mut comments);

        tracing::debug!("Generated {} comments for {}", comments.len(), patient_id);
        comments
    }

    /// A template sentence for the topic, sometimes followed by a recommendation.
    pub fn text<R: Rng + ?Sized>(&self, rng: &mut R, topic: Topic) -> String {
        let mut text = pick(rng, comment_templates(topic)).to_string();
        if chance(rng, self.suffix_chance) {
            text.push(' ');
            text.push_str(pick(rng, &COMMENT_SUFFIXES));
        }
        text
    }
}

/// Doctors are `Dr. <last>`; everyone else `<first> <last>`.
pub fn author_name<R: Rng + ?Sized>(rng: &mut R, profession: Profession) -> String {
    match profession {
        Profession::Doctor => format!("Dr. {}", pick(rng, &DOCTOR_SURNAMES)),
        _ => format!("{} {}", pick(rng, &STAFF_FIRST_NAMES), pick(rng, &STAFF_LAST_NAMES)),
    }
}

// ============================================================================
// Runtime drafts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("comment text is empty")]
    EmptyText,
    #[error("comment author is empty")]
    EmptyAuthor,
}

/// A comment submitted at runtime, before it has an id or timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub author: String,
    pub profession: Profession,
    pub topic: Topic,
    pub text: String,
}

impl CommentDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.text.trim().is_empty() {
            return Err(DraftError::EmptyText);
        }
        if self.author.trim().is_empty() {
            return Err(DraftError::EmptyAuthor);
        }
        Ok(())
    }

    /// Stamp the draft as the `position`-th comment (1-based) in the log.
    pub fn into_comment(self, patient_id: &str, position: usize, timestamp: NaiveDateTime) -> Result<Comment, DraftError> {
        self.validate()?;
        Ok(Comment {
            id: Comment::id_for(position),
            patient_id: patient_id.to_string(),
            timestamp,
            author: self.author.trim().to_string(),
            profession: self.profession,
            topic: self.topic,
            text: self.text.trim().to_string(),
        })
    }
}
