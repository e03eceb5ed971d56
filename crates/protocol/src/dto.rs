//! Wire types for the quest persistence API
//!
//! Inbound shapes are decoded tolerantly: every field the backend may omit
//! carries `#[serde(default)]` so partial data never fails a page load.
//! Outbound shapes skip fields that do not belong to the question type being
//! serialized.

use serde::{Deserialize, Serialize};

/// Quest as returned by `GET /quests/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub proficiencies: Vec<String>,
    #[serde(default)]
    pub quest_steps: Vec<QuestStepDto>,
}

/// Persisted quest step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStepDto {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub npc_type: String,
    #[serde(default)]
    pub npc_behaviour: String,
    #[serde(rename = "type", default)]
    pub step_type: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub contents: Vec<ContentDto>,
}

/// Create/update payload for a quest step.
///
/// Metadata and contents always travel together in one request; there is no
/// intermediate state in which a step exists without its intended contents.
/// `quest_id` is required on create and omitted on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub name: String,
    pub description: String,
    pub order: u32,
    pub npc_type: String,
    pub npc_behaviour: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_id: Option<String>,
    pub contents: Vec<ContentDto>,
}

/// Response body of `POST /quest-steps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStepDto {
    pub id: String,
}

/// One content item inside a step's `contents[]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    #[serde(default)]
    pub quest_step_content_type: String,
    #[serde(default)]
    pub question_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub expected_answers: ExpectedAnswersDto,
}

/// Single wire representation shared by every question type.
///
/// Only the fields belonging to `question_type` are populated; the rest are
/// empty and skipped on serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedAnswersDto {
    #[serde(default)]
    pub question_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ordering_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correct_order: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_fill_matches: Option<ColumnFillMatches>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_left: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_right: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_pairs: Vec<MatchPairDto>,
}

/// Answer option on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

/// ColumnFill answers arrive in two historical shapes: a pair list
/// (`[{left: "0", right: "ans"}]`) and an index-keyed object map
/// (`{"0": "ans"}`). Both are accepted on decode; the pair list is what we
/// emit. Anything else is captured raw and treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnFillMatches {
    Pairs(Vec<ColumnFillPairDto>),
    Map(std::collections::BTreeMap<String, String>),
    Other(serde_json::Value),
}

/// Legacy pair form: `left` is the placeholder index as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFillPairDto {
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
}

/// One left-to-right association of a MatchTwoRows question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPairDto {
    pub left_index: u32,
    pub right_index: u32,
}

fn default_true() -> bool {
    true
}
