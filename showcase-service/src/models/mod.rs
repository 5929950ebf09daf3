pub mod event;
pub mod tech_detail;

pub use event::Event;
pub use tech_detail::{
    Brochure, CreatedBy, Image, Innovator, PatentStatus, RelatedLink, TechDetail,
};
