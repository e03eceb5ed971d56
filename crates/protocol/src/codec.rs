//! AnswerVariant codec - editing state to/from the wire representation
//!
//! Decoding is total: malformed or partial payloads degrade to empty
//! defaults instead of failing the load (the backend owns source-of-truth
//! validation). Encoding is an exhaustive match over the payload variants,
//! so adding a question type cannot silently skip its wire mapping.

use lessonforge_domain::{
    ActivityType, AnswerOption, AnswerPayload, Quest, QuestId, QuestStep, QuestStepId, Question,
    QuestionId, QuestionType, StepCharacter,
};

use crate::dto::{
    ColumnFillMatches, ColumnFillPairDto, ContentDto, ExpectedAnswersDto, MatchPairDto, OptionDto,
    QuestDto, QuestStepDto, StepPayload,
};

/// Decode a fetched quest, sorting its steps by sequence.
///
/// A quest with no `questSteps` becomes an empty list, not an error.
pub fn decode_quest(dto: QuestDto) -> Quest {
    let mut quest = Quest {
        id: QuestId::new(dto.id),
        name: dto.name,
        description: dto.description,
        subject: dto.subject,
        grade: dto.grade,
        proficiencies: dto.proficiencies,
        steps: dto.quest_steps.into_iter().map(decode_step).collect(),
    };
    quest.sort_steps();
    quest
}

/// Decode one persisted step; its questions keep their declared order and
/// are re-sequenced 1..N for internal consistency.
pub fn decode_step(dto: QuestStepDto) -> QuestStep {
    let mut step = QuestStep::new(dto.name, dto.order);
    step.server_id = Some(QuestStepId::new(dto.id));
    step.step_type = dto.step_type;
    step.is_active = dto.is_active;
    step.character = StepCharacter::from_tag(&dto.npc_type);
    step.suggestion = dto.npc_behaviour;
    step.questions = dto.contents.iter().map(decode_content).collect();
    step.resequence_questions();
    step
}

/// Decode one content item into a question draft.
///
/// Unknown question types degrade to an empty default for the item's
/// activity: `Dissertative` for exercises, `AlwaysCorrect` for informative
/// content.
pub fn decode_content(dto: &ContentDto) -> Question {
    let activity_type = ActivityType::from_tag(&dto.quest_step_content_type);
    let question_type = QuestionType::from_tag(&dto.question_type)
        .or_else(|| QuestionType::from_tag(&dto.expected_answers.question_type))
        .unwrap_or(match activity_type {
            ActivityType::Informative => QuestionType::AlwaysCorrect,
            ActivityType::Exercise => QuestionType::Dissertative,
        });
    Question {
        id: QuestionId::new(),
        activity_type,
        sequence: dto.order,
        weight: dto.weight,
        is_active: dto.is_active,
        title: dto.description.clone(),
        image: dto.image_url.clone(),
        payload: decode_expected_answers(question_type, &dto.expected_answers),
    }
}

/// Populate the editing payload for a question type from the wire shape
pub fn decode_expected_answers(
    question_type: QuestionType,
    dto: &ExpectedAnswersDto,
) -> AnswerPayload {
    match question_type {
        QuestionType::MultipleChoice => AnswerPayload::MultipleChoice {
            options: decode_options(&dto.options),
        },
        QuestionType::SingleChoice => AnswerPayload::SingleChoice {
            options: decode_options(&dto.options),
        },
        QuestionType::TrueOrFalse => AnswerPayload::TrueOrFalse {
            options: decode_options(&dto.options),
        },
        QuestionType::Dissertative => AnswerPayload::Dissertative,
        QuestionType::Ordering => {
            let items = dto.ordering_items.clone();
            let correct_order: Vec<usize> =
                dto.correct_order.iter().map(|&i| i as usize).collect();
            // Anything that is not a permutation of the items degrades to
            // the identity.
            let valid = correct_order.len() == items.len()
                && correct_order.iter().all(|&i| i < items.len());
            let correct_order = if valid {
                correct_order
            } else {
                (0..items.len()).collect()
            };
            AnswerPayload::Ordering {
                items,
                correct_order,
            }
        }
        QuestionType::ColumnFill => AnswerPayload::ColumnFill {
            answers: decode_column_fill(dto.column_fill_matches.as_ref()),
        },
        QuestionType::MatchTwoRows => {
            let left = dto.match_left.clone();
            let right = dto.match_right.clone();
            let mut matches = vec![None; left.len()];
            for pair in &dto.match_pairs {
                let (l, r) = (pair.left_index as usize, pair.right_index as usize);
                if l < left.len() && r < right.len() {
                    matches[l] = Some(r);
                }
            }
            AnswerPayload::MatchTwoRows {
                left,
                right,
                matches,
            }
        }
        QuestionType::AlwaysCorrect => AnswerPayload::AlwaysCorrect,
    }
}

fn decode_options(options: &[OptionDto]) -> Vec<AnswerOption> {
    options
        .iter()
        .map(|o| AnswerOption {
            id: o.id.clone(),
            text: o.text.clone(),
            image: o.image.clone(),
            is_correct: o.is_correct,
        })
        .collect()
}

/// Project either historical ColumnFill shape onto a flat answers array.
///
/// Pair lists are sorted by numeric `left`; object maps by numeric key.
/// Entries whose index does not parse are dropped. A missing or malformed
/// value yields one empty slot.
fn decode_column_fill(matches: Option<&ColumnFillMatches>) -> Vec<String> {
    let entries: Vec<(usize, String)> = match matches {
        Some(ColumnFillMatches::Pairs(pairs)) => pairs
            .iter()
            .filter_map(|p| Some((p.left.trim().parse().ok()?, p.right.clone())))
            .collect(),
        Some(ColumnFillMatches::Map(map)) => map
            .iter()
            .filter_map(|(k, v)| Some((k.trim().parse().ok()?, v.clone())))
            .collect(),
        Some(ColumnFillMatches::Other(_)) | None => Vec::new(),
    };
    let Some(max) = entries.iter().map(|(i, _)| *i).max() else {
        return vec![String::new()];
    };
    let mut answers = vec![String::new(); max + 1];
    for (i, value) in entries {
        answers[i] = value;
    }
    answers
}

/// Serialize a question back to its content wire shape
pub fn encode_content(question: &Question) -> ContentDto {
    ContentDto {
        quest_step_content_type: question.activity_type.as_str().to_string(),
        question_type: question.question_type().as_str().to_string(),
        description: question.title.clone(),
        weight: question.weight,
        is_active: question.is_active,
        order: question.sequence,
        image_url: question.image.clone(),
        expected_answers: encode_expected_answers(&question.payload),
    }
}

/// Materialize the single wire representation for a payload
pub fn encode_expected_answers(payload: &AnswerPayload) -> ExpectedAnswersDto {
    let mut dto = ExpectedAnswersDto {
        question_type: payload.question_type().as_str().to_string(),
        ..ExpectedAnswersDto::default()
    };
    match payload {
        AnswerPayload::MultipleChoice { options }
        | AnswerPayload::SingleChoice { options }
        | AnswerPayload::TrueOrFalse { options } => {
            dto.options = encode_options(options);
        }
        AnswerPayload::Dissertative | AnswerPayload::AlwaysCorrect => {}
        AnswerPayload::Ordering {
            items,
            correct_order,
        } => {
            dto.ordering_items = items.clone();
            // No explicit order recorded means the displayed order is the
            // correct one.
            dto.correct_order = if correct_order.len() == items.len() {
                correct_order.iter().map(|&i| i as u32).collect()
            } else {
                (0..items.len() as u32).collect()
            };
        }
        AnswerPayload::ColumnFill { answers } => {
            dto.column_fill_matches = Some(ColumnFillMatches::Pairs(
                answers
                    .iter()
                    .enumerate()
                    .map(|(i, answer)| ColumnFillPairDto {
                        left: i.to_string(),
                        right: answer.clone(),
                    })
                    .collect(),
            ));
        }
        AnswerPayload::MatchTwoRows {
            left,
            right,
            matches,
        } => {
            dto.match_left = left.clone();
            dto.match_right = right.clone();
            // A left item may be intentionally unmatched; only defined
            // associations go on the wire.
            dto.match_pairs = matches
                .iter()
                .enumerate()
                .filter_map(|(l, r)| {
                    r.map(|r| MatchPairDto {
                        left_index: l as u32,
                        right_index: r as u32,
                    })
                })
                .collect();
        }
    }
    dto
}

fn encode_options(options: &[AnswerOption]) -> Vec<OptionDto> {
    options
        .iter()
        .map(|o| OptionDto {
            id: o.id.clone(),
            text: o.text.clone(),
            image: o.image.clone(),
            is_correct: o.is_correct,
        })
        .collect()
}

/// Build the create/update payload for one step.
///
/// `quest_id` is supplied on create only. Metadata and every encoded
/// content travel together.
pub fn encode_step_payload(step: &QuestStep, quest_id: Option<&QuestId>) -> StepPayload {
    StepPayload {
        name: step.title.clone(),
        description: step.suggestion.clone(),
        order: step.sequence,
        npc_type: step.character.as_str().to_string(),
        npc_behaviour: step.suggestion.clone(),
        step_type: step.step_type.clone(),
        is_active: step.is_active,
        quest_id: quest_id.map(|id| id.as_str().to_string()),
        contents: step.questions.iter().map(encode_content).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(question_type: &str) -> ExpectedAnswersDto {
        ExpectedAnswersDto {
            question_type: question_type.to_string(),
            ..ExpectedAnswersDto::default()
        }
    }

    fn content(question_type: &str, expected_answers: ExpectedAnswersDto) -> ContentDto {
        ContentDto {
            quest_step_content_type: "Exercise".to_string(),
            question_type: question_type.to_string(),
            description: "statement".to_string(),
            weight: 2,
            is_active: true,
            order: 1,
            image_url: None,
            expected_answers,
        }
    }

    #[test]
    fn test_single_choice_round_trip() {
        let dto = content(
            "SingleChoice",
            ExpectedAnswersDto {
                options: vec![
                    OptionDto {
                        id: Some("o1".to_string()),
                        text: "wrong".to_string(),
                        image: None,
                        is_correct: false,
                    },
                    OptionDto {
                        id: Some("o2".to_string()),
                        text: "right".to_string(),
                        image: None,
                        is_correct: true,
                    },
                ],
                ..expected("SingleChoice")
            },
        );
        let question = decode_content(&dto);
        assert_eq!(question.question_type(), QuestionType::SingleChoice);
        assert_eq!(encode_content(&question), dto);
    }

    #[test]
    fn test_ordering_round_trip() {
        let dto = content(
            "Ordering",
            ExpectedAnswersDto {
                ordering_items: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                correct_order: vec![0, 1, 2],
                ..expected("Ordering")
            },
        );
        let question = decode_content(&dto);
        assert_eq!(encode_content(&question), dto);
    }

    #[test]
    fn test_ordering_invalid_correct_order_degrades_to_identity() {
        let dto = content(
            "Ordering",
            ExpectedAnswersDto {
                ordering_items: vec!["a".to_string(), "b".to_string()],
                correct_order: vec![7, 1],
                ..expected("Ordering")
            },
        );
        let question = decode_content(&dto);
        match question.payload {
            AnswerPayload::Ordering { correct_order, .. } => {
                assert_eq!(correct_order, vec![0, 1]);
            }
            other => panic!("expected Ordering, got {other:?}"),
        }
    }

    #[test]
    fn test_column_fill_pair_list_sorted_numerically() {
        let dto = content(
            "ColumnFill",
            ExpectedAnswersDto {
                column_fill_matches: Some(ColumnFillMatches::Pairs(vec![
                    ColumnFillPairDto {
                        left: "2".to_string(),
                        right: "two".to_string(),
                    },
                    ColumnFillPairDto {
                        left: "0".to_string(),
                        right: "zero".to_string(),
                    },
                ])),
                ..expected("ColumnFill")
            },
        );
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::ColumnFill { answers } => {
                assert_eq!(answers, &["zero", "", "two"]);
            }
            other => panic!("expected ColumnFill, got {other:?}"),
        }
    }

    #[test]
    fn test_column_fill_object_map_accepted() {
        let dto = content(
            "ColumnFill",
            ExpectedAnswersDto {
                column_fill_matches: Some(ColumnFillMatches::Map(
                    [
                        ("10".to_string(), "ten".to_string()),
                        ("2".to_string(), "two".to_string()),
                    ]
                    .into_iter()
                    .collect(),
                )),
                ..expected("ColumnFill")
            },
        );
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::ColumnFill { answers } => {
                assert_eq!(answers.len(), 11);
                assert_eq!(answers[2], "two");
                assert_eq!(answers[10], "ten");
            }
            other => panic!("expected ColumnFill, got {other:?}"),
        }
    }

    #[test]
    fn test_column_fill_missing_matches_yields_one_empty_slot() {
        let dto = content("ColumnFill", expected("ColumnFill"));
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::ColumnFill { answers } => {
                assert_eq!(answers, &[String::new()]);
            }
            other => panic!("expected ColumnFill, got {other:?}"),
        }
    }

    #[test]
    fn test_column_fill_malformed_matches_tolerated() {
        let dto = content(
            "ColumnFill",
            ExpectedAnswersDto {
                column_fill_matches: Some(ColumnFillMatches::Other(serde_json::json!(42))),
                ..expected("ColumnFill")
            },
        );
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::ColumnFill { answers } => {
                assert_eq!(answers, &[String::new()]);
            }
            other => panic!("expected ColumnFill, got {other:?}"),
        }
    }

    #[test]
    fn test_column_fill_encode_emits_pair_list() {
        let question = Question {
            payload: AnswerPayload::ColumnFill {
                answers: vec!["zero".to_string(), String::new()],
            },
            ..Question::new_exercise()
        };
        let dto = encode_content(&question);
        match dto.expected_answers.column_fill_matches {
            Some(ColumnFillMatches::Pairs(pairs)) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].left, "0");
                assert_eq!(pairs[0].right, "zero");
                assert_eq!(pairs[1].left, "1");
                assert_eq!(pairs[1].right, "");
            }
            other => panic!("expected pair list, got {other:?}"),
        }
    }

    #[test]
    fn test_match_two_rows_round_trip_skips_unmatched() {
        let dto = content(
            "MatchTwoRows",
            ExpectedAnswersDto {
                match_left: vec!["l0".to_string(), "l1".to_string()],
                match_right: vec!["r0".to_string(), "r1".to_string()],
                match_pairs: vec![MatchPairDto {
                    left_index: 1,
                    right_index: 0,
                }],
                ..expected("MatchTwoRows")
            },
        );
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::MatchTwoRows { matches, .. } => {
                assert_eq!(matches, &[None, Some(0)]);
            }
            other => panic!("expected MatchTwoRows, got {other:?}"),
        }
        assert_eq!(encode_content(&question), dto);
    }

    #[test]
    fn test_match_pairs_out_of_range_ignored() {
        let dto = content(
            "MatchTwoRows",
            ExpectedAnswersDto {
                match_left: vec!["l0".to_string()],
                match_right: vec!["r0".to_string()],
                match_pairs: vec![
                    MatchPairDto {
                        left_index: 5,
                        right_index: 0,
                    },
                    MatchPairDto {
                        left_index: 0,
                        right_index: 9,
                    },
                ],
                ..expected("MatchTwoRows")
            },
        );
        let question = decode_content(&dto);
        match &question.payload {
            AnswerPayload::MatchTwoRows { matches, .. } => assert_eq!(matches, &[None]),
            other => panic!("expected MatchTwoRows, got {other:?}"),
        }
    }

    #[test]
    fn test_dissertative_round_trip_has_no_payload_fields() {
        let dto = content("Dissertative", expected("Dissertative"));
        let question = decode_content(&dto);
        assert_eq!(question.question_type(), QuestionType::Dissertative);
        let encoded = encode_content(&question);
        assert!(encoded.expected_answers.options.is_empty());
        assert_eq!(encoded, dto);
    }

    #[test]
    fn test_unknown_question_type_degrades_by_activity() {
        let exercise = content("Essay", expected("Essay"));
        assert_eq!(
            decode_content(&exercise).question_type(),
            QuestionType::Dissertative
        );

        let informative = ContentDto {
            quest_step_content_type: "Informative".to_string(),
            ..exercise
        };
        assert_eq!(
            decode_content(&informative).question_type(),
            QuestionType::AlwaysCorrect
        );
    }

    #[test]
    fn test_decode_quest_without_steps() {
        let quest = decode_quest(QuestDto {
            id: "q1".to_string(),
            name: "Fractions".to_string(),
            description: String::new(),
            subject: None,
            grade: None,
            proficiencies: Vec::new(),
            quest_steps: Vec::new(),
        });
        assert!(quest.steps.is_empty());
    }

    #[test]
    fn test_decode_step_resequences_questions() {
        let step = decode_step(QuestStepDto {
            id: "s1".to_string(),
            name: "intro".to_string(),
            description: String::new(),
            order: 1,
            npc_type: "Robot".to_string(),
            npc_behaviour: "try counting first".to_string(),
            step_type: "warmup".to_string(),
            is_active: true,
            contents: vec![
                content("Dissertative", expected("Dissertative")),
                content("Dissertative", expected("Dissertative")),
            ],
        });
        assert_eq!(step.server_id.as_ref().map(|id| id.as_str()), Some("s1"));
        assert_eq!(step.character, StepCharacter::Robot);
        assert_eq!(step.questions[0].sequence, 1);
        assert_eq!(step.questions[1].sequence, 2);
    }

    #[test]
    fn test_encode_step_payload_carries_quest_id_only_when_given() {
        let mut step = QuestStep::new("intro", 1);
        step.upsert_question(Question::new_exercise().with_title("q"));
        let quest_id = QuestId::new("q1");

        let create = encode_step_payload(&step, Some(&quest_id));
        assert_eq!(create.quest_id.as_deref(), Some("q1"));
        assert_eq!(create.contents.len(), 1);

        let update = encode_step_payload(&step, None);
        assert_eq!(update.quest_id, None);
    }

    #[test]
    fn test_wire_json_shape() {
        let payload = AnswerPayload::SingleChoice {
            options: vec![AnswerOption::correct("right")],
        };
        let value = serde_json::to_value(encode_expected_answers(&payload)).expect("serialize");
        assert_eq!(value["questionType"], "SingleChoice");
        assert_eq!(value["options"][0]["isCorrect"], true);
        // Fields of other types are absent, not null or empty.
        assert!(value.get("orderingItems").is_none());
        assert!(value.get("columnFillMatches").is_none());
    }
}
