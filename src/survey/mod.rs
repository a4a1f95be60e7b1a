mod dimension;
mod record;
mod responses;

pub use dimension::Dimension;
pub use record::SurveyRecord;
pub use responses::ResponseSet;
