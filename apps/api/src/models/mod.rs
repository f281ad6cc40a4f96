pub mod resume;

pub use resume::{
    Education, Experience, KeyInfoItem, Link, Profile, Project, ResumeDocument, SectionData,
    SkillCategory,
};
