pub mod codec;
pub mod dto;

pub use dto::{
    ColumnFillMatches, ColumnFillPairDto, ContentDto, CreatedStepDto, ExpectedAnswersDto,
    MatchPairDto, OptionDto, QuestDto, QuestStepDto, StepPayload,
};
