//! Answer payloads - the per-type editing state of a question
//!
//! Each question type carries its own payload variant and nothing else; a
//! persisted question never mixes fields from another type. The editing
//! rules (single-select exclusivity, identity ordering, placeholder sync,
//! match cycling) live here so every editor enforces the same behavior.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::QuestionType;

/// A single selectable choice belonging to a choice-style question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    /// Server-assigned id; None until the owning step is persisted
    pub id: Option<String>,
    pub text: String,
    pub image: Option<String>,
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            image: None,
            is_correct: false,
        }
    }

    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            is_correct: true,
            ..Self::new(text)
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Type-specific answer state, one variant per question type
///
/// The variants mirror the seven answer shapes plus the `AlwaysCorrect`
/// sentinel used by informative content. The wire mapping lives in the
/// protocol crate; this type only knows how authors edit each shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerPayload {
    MultipleChoice {
        options: Vec<AnswerOption>,
    },
    SingleChoice {
        options: Vec<AnswerOption>,
    },
    TrueOrFalse {
        options: Vec<AnswerOption>,
    },
    /// Free-text answer collected at runtime; nothing to configure
    Dissertative,
    Ordering {
        items: Vec<String>,
        /// Index permutation; `items[correct_order[i]]` is the i-th correct
        /// item. Rewritten to the identity after every reorder.
        correct_order: Vec<usize>,
    },
    ColumnFill {
        /// Expected answer per `{N}` placeholder, indexed by N
        answers: Vec<String>,
    },
    MatchTwoRows {
        left: Vec<String>,
        right: Vec<String>,
        /// Parallel to `left`; None means intentionally unmatched
        matches: Vec<Option<usize>>,
    },
    /// Informative content; always scores as correct
    AlwaysCorrect,
}

impl AnswerPayload {
    /// Empty editing scaffold for a question type
    pub fn default_for(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::MultipleChoice => Self::MultipleChoice {
                options: vec![AnswerOption::new("")],
            },
            QuestionType::SingleChoice => Self::SingleChoice {
                options: vec![AnswerOption::new("")],
            },
            QuestionType::TrueOrFalse => Self::TrueOrFalse {
                options: vec![AnswerOption::new("")],
            },
            QuestionType::Dissertative => Self::Dissertative,
            QuestionType::Ordering => Self::Ordering {
                items: Vec::new(),
                correct_order: Vec::new(),
            },
            QuestionType::ColumnFill => Self::ColumnFill {
                answers: vec![String::new()],
            },
            QuestionType::MatchTwoRows => Self::MatchTwoRows {
                left: Vec::new(),
                right: Vec::new(),
                matches: Vec::new(),
            },
            QuestionType::AlwaysCorrect => Self::AlwaysCorrect,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Self::SingleChoice { .. } => QuestionType::SingleChoice,
            Self::TrueOrFalse { .. } => QuestionType::TrueOrFalse,
            Self::Dissertative => QuestionType::Dissertative,
            Self::Ordering { .. } => QuestionType::Ordering,
            Self::ColumnFill { .. } => QuestionType::ColumnFill,
            Self::MatchTwoRows { .. } => QuestionType::MatchTwoRows,
            Self::AlwaysCorrect => QuestionType::AlwaysCorrect,
        }
    }

    /// Answer options of a choice-style payload
    pub fn options(&self) -> Option<&[AnswerOption]> {
        match self {
            Self::MultipleChoice { options }
            | Self::SingleChoice { options }
            | Self::TrueOrFalse { options } => Some(options),
            _ => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<AnswerOption>> {
        match self {
            Self::MultipleChoice { options }
            | Self::SingleChoice { options }
            | Self::TrueOrFalse { options } => Some(options),
            _ => None,
        }
    }

    /// Append a blank option to a choice-style payload
    pub fn add_option(&mut self) -> Result<(), DomainError> {
        let question_type = self.question_type().as_str();
        self.options_mut()
            .ok_or(DomainError::UnsupportedOperation {
                question_type,
                operation: "add_option",
            })?
            .push(AnswerOption::new(""));
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> Result<(), DomainError> {
        let question_type = self.question_type().as_str();
        let options = self
            .options_mut()
            .ok_or(DomainError::UnsupportedOperation {
                question_type,
                operation: "remove_option",
            })?;
        if index >= options.len() {
            return Err(DomainError::IndexOutOfBounds {
                index,
                len: options.len(),
            });
        }
        options.remove(index);
        Ok(())
    }

    /// Replace the display text of one option
    pub fn set_option_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DomainError> {
        let question_type = self.question_type().as_str();
        let options = self
            .options_mut()
            .ok_or(DomainError::UnsupportedOperation {
                question_type,
                operation: "set_option_text",
            })?;
        match options.get_mut(index) {
            Some(option) => {
                option.text = text.into();
                Ok(())
            }
            None => Err(DomainError::IndexOutOfBounds {
                index,
                len: options.len(),
            }),
        }
    }

    /// Toggle or set `is_correct` on one option.
    ///
    /// SingleChoice is exclusive: marking an option clears every sibling,
    /// so at most one option is ever correct. MultipleChoice and TrueOrFalse
    /// toggle the option independently (multiple "true" options are allowed
    /// for TrueOrFalse).
    pub fn mark_correct(&mut self, index: usize) -> Result<(), DomainError> {
        let exclusive = matches!(self, Self::SingleChoice { .. });
        let question_type = self.question_type().as_str();
        let options = self
            .options_mut()
            .ok_or(DomainError::UnsupportedOperation {
                question_type,
                operation: "mark_correct",
            })?;
        if index >= options.len() {
            return Err(DomainError::IndexOutOfBounds {
                index,
                len: options.len(),
            });
        }
        if exclusive {
            for (i, option) in options.iter_mut().enumerate() {
                option.is_correct = i == index;
            }
        } else {
            options[index].is_correct = !options[index].is_correct;
        }
        Ok(())
    }

    /// Append an item to an Ordering payload, keeping the identity order
    pub fn add_ordering_item(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        match self {
            Self::Ordering {
                items,
                correct_order,
            } => {
                items.push(text.into());
                *correct_order = identity(items.len());
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "add_ordering_item",
            }),
        }
    }

    /// Swap an Ordering item with its predecessor.
    ///
    /// The displayed order is always the correct order, so `correct_order`
    /// is reset to the identity permutation after the swap. Moving the first
    /// item up is a no-op.
    pub fn move_item_up(&mut self, index: usize) -> Result<(), DomainError> {
        self.move_item(index, Direction::Up)
    }

    /// Swap an Ordering item with its successor; see [`Self::move_item_up`]
    pub fn move_item_down(&mut self, index: usize) -> Result<(), DomainError> {
        self.move_item(index, Direction::Down)
    }

    fn move_item(&mut self, index: usize, direction: Direction) -> Result<(), DomainError> {
        match self {
            Self::Ordering {
                items,
                correct_order,
            } => {
                if index >= items.len() {
                    return Err(DomainError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                    });
                }
                match direction {
                    Direction::Up if index > 0 => items.swap(index - 1, index),
                    Direction::Down if index + 1 < items.len() => items.swap(index, index + 1),
                    _ => {}
                }
                *correct_order = identity(items.len());
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "move_item",
            }),
        }
    }

    /// Set the expected answer for one ColumnFill placeholder
    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), DomainError> {
        match self {
            Self::ColumnFill { answers } => {
                if index >= answers.len() {
                    return Err(DomainError::IndexOutOfBounds {
                        index,
                        len: answers.len(),
                    });
                }
                answers[index] = text.into();
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "set_answer",
            }),
        }
    }

    /// Resize the ColumnFill answers to match the `{N}` placeholders in the
    /// template, preserving answers at indices that survive.
    ///
    /// One-way sync, triggered explicitly by the author. A template with no
    /// placeholders keeps a single empty slot.
    pub fn sync_placeholders(&mut self, template: &str) -> Result<(), DomainError> {
        match self {
            Self::ColumnFill { answers } => {
                let detected = detect_placeholders(template);
                let len = detected.iter().max().map_or(1, |max| max + 1);
                answers.resize(len, String::new());
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "sync_placeholders",
            }),
        }
    }

    /// Advance one left item's association to the next right item, wrapping
    /// to "unmatched" after the last. Several left items may target the same
    /// right item.
    pub fn cycle_match(&mut self, left_index: usize) -> Result<(), DomainError> {
        match self {
            Self::MatchTwoRows { left, right, matches } => {
                if left_index >= left.len() {
                    return Err(DomainError::IndexOutOfBounds {
                        index: left_index,
                        len: left.len(),
                    });
                }
                matches.resize(left.len(), None);
                matches[left_index] = match matches[left_index] {
                    None if right.is_empty() => None,
                    None => Some(0),
                    Some(i) if i + 1 < right.len() => Some(i + 1),
                    Some(_) => None,
                };
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "cycle_match",
            }),
        }
    }

    /// Append an item to the left column of a MatchTwoRows payload
    pub fn add_match_left(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        match self {
            Self::MatchTwoRows { left, matches, .. } => {
                left.push(text.into());
                matches.push(None);
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "add_match_left",
            }),
        }
    }

    /// Append an item to the right column of a MatchTwoRows payload
    pub fn add_match_right(&mut self, text: impl Into<String>) -> Result<(), DomainError> {
        match self {
            Self::MatchTwoRows { right, .. } => {
                right.push(text.into());
                Ok(())
            }
            _ => Err(DomainError::UnsupportedOperation {
                question_type: self.question_type().as_str(),
                operation: "add_match_right",
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

fn identity(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Distinct `{N}` placeholder indices found in a template, sorted.
///
/// Tokens that are not `{<integer>}` are ignored; a repeated index is
/// reported once.
pub fn detect_placeholders(template: &str) -> Vec<usize> {
    let Ok(re) = Regex::new(r"\{(\d+)\}") else {
        return Vec::new();
    };
    let mut indices: Vec<usize> = re
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}
