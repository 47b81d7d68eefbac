use super::{QuestionBank, StatementDef};
use once_cell::sync::Lazy;

pub const NATURE: &str = "Nature & Environment";
pub const LOGIC: &str = "Numbers & Logic";
pub const WORDS: &str = "Words & Communication";
pub const PEOPLE: &str = "People & Community";
pub const MAKING: &str = "Making & Building";
pub const MOVEMENT: &str = "Movement & Health";
pub const ARTS: &str = "Arts & Creativity";
pub const TECHNOLOGY: &str = "Technology & Innovation";
pub const ENTERPRISE: &str = "Entrepreneurship & Initiative";
pub const CRITICAL: &str = "Critical & Reflective Thinking";
pub const EMOTIONAL: &str = "Emotional & Social Intelligence";
pub const DIGITAL: &str = "Digital Media & Creativity";
pub const SCIENCE: &str = "Scientific Curiosity";
pub const LEADERSHIP: &str = "Collaborative & Leadership Skills";
pub const WELLBEING: &str = "Mindfulness & Wellbeing";

struct Entry {
    id: &'static str,
    text: &'static str,
    primary: &'static str,
    secondary: &'static [(&'static str, f64)],
}

impl Entry {
    fn to_definition(&self) -> StatementDef {
        StatementDef {
            id: self.id.to_string(),
            text: self.text.to_string(),
            primary: self.primary.to_string(),
            secondary: self
                .secondary
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        }
    }
}

pub static BUILTIN: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_definitions(CATALOG.iter().map(Entry::to_definition))
        .expect("built-in question bank is valid")
});

const CATALOG: &[Entry] = &[
    Entry {
        id: "nature-1",
        text: "I enjoy observing animals, plants, or natural environments.",
        primary: NATURE,
        secondary: &[(SCIENCE, 0.4)],
    },
    Entry {
        id: "nature-2",
        text: "I am curious about how ecosystems and the Earth work.",
        primary: NATURE,
        secondary: &[(SCIENCE, 0.4)],
    },
    Entry {
        id: "nature-3",
        text: "I like learning about environmental problems and ways to solve them.",
        primary: NATURE,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "nature-4",
        text: "I feel motivated to protect nature or wildlife.",
        primary: NATURE,
        secondary: &[(EMOTIONAL, 0.3)],
    },
    Entry {
        id: "logic-1",
        text: "I enjoy solving puzzles or logic problems.",
        primary: LOGIC,
        secondary: &[(CRITICAL, 0.4)],
    },
    Entry {
        id: "logic-2",
        text: "I like spotting patterns or trends in numbers or data.",
        primary: LOGIC,
        secondary: &[(SCIENCE, 0.4)],
    },
    Entry {
        id: "logic-3",
        text: "I feel confident analyzing information to make decisions.",
        primary: LOGIC,
        secondary: &[(CRITICAL, 0.5)],
    },
    Entry {
        id: "logic-4",
        text: "I enjoy planning and strategizing in games or projects.",
        primary: LOGIC,
        secondary: &[(ENTERPRISE, 0.3)],
    },
    Entry {
        id: "words-1",
        text: "I enjoy writing stories, essays, or articles.",
        primary: WORDS,
        secondary: &[(ARTS, 0.4)],
    },
    Entry {
        id: "words-2",
        text: "I like explaining ideas clearly so others understand them.",
        primary: WORDS,
        secondary: &[(EMOTIONAL, 0.3)],
    },
    Entry {
        id: "words-3",
        text: "I am interested in how words and language influence people.",
        primary: WORDS,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "words-4",
        text: "I enjoy sharing my ideas through speeches, blogs, or media.",
        primary: WORDS,
        secondary: &[(DIGITAL, 0.4)],
    },
    Entry {
        id: "people-1",
        text: "I enjoy helping others overcome challenges or learn new skills.",
        primary: PEOPLE,
        secondary: &[(EMOTIONAL, 0.5)],
    },
    Entry {
        id: "people-2",
        text: "I like working collaboratively to achieve a shared goal.",
        primary: PEOPLE,
        secondary: &[(LEADERSHIP, 0.4)],
    },
    Entry {
        id: "people-3",
        text: "I am curious about understanding how people think and feel.",
        primary: PEOPLE,
        secondary: &[(EMOTIONAL, 0.5)],
    },
    Entry {
        id: "people-4",
        text: "I feel motivated to make a positive difference in my community.",
        primary: PEOPLE,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "making-1",
        text: "I enjoy designing or creating objects or systems.",
        primary: MAKING,
        secondary: &[(TECHNOLOGY, 0.4)],
    },
    Entry {
        id: "making-2",
        text: "I like improving or fixing things to make them work better.",
        primary: MAKING,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "making-3",
        text: "I feel proud when I complete a hands-on project.",
        primary: MAKING,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "making-4",
        text: "I enjoy experimenting with ideas to create new things.",
        primary: MAKING,
        secondary: &[(ENTERPRISE, 0.4)],
    },
    Entry {
        id: "movement-1",
        text: "I enjoy physical activities that challenge my body.",
        primary: MOVEMENT,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "movement-2",
        text: "I am interested in learning how the body works and stays healthy.",
        primary: MOVEMENT,
        secondary: &[(SCIENCE, 0.3)],
    },
    Entry {
        id: "movement-3",
        text: "I like setting goals to improve my fitness or skills.",
        primary: MOVEMENT,
        secondary: &[(WELLBEING, 0.4)],
    },
    Entry {
        id: "movement-4",
        text: "I feel energized by sports, dance, or other active challenges.",
        primary: MOVEMENT,
        secondary: &[(EMOTIONAL, 0.3)],
    },
    Entry {
        id: "arts-1",
        text: "I enjoy creating art, music, or performance projects.",
        primary: ARTS,
        secondary: &[(DIGITAL, 0.4)],
    },
    Entry {
        id: "arts-2",
        text: "I like coming up with original ideas or new ways of doing things.",
        primary: ARTS,
        secondary: &[(ENTERPRISE, 0.4)],
    },
    Entry {
        id: "arts-3",
        text: "I enjoy experimenting with styles, colors, or artistic techniques.",
        primary: ARTS,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "arts-4",
        text: "I feel inspired when imagining or designing something new.",
        primary: ARTS,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "tech-1",
        text: "I enjoy learning how technology, gadgets, or software work.",
        primary: TECHNOLOGY,
        secondary: &[(SCIENCE, 0.4)],
    },
    Entry {
        id: "tech-2",
        text: "I like thinking of ways technology can solve real problems.",
        primary: TECHNOLOGY,
        secondary: &[(ENTERPRISE, 0.4)],
    },
    Entry {
        id: "tech-3",
        text: "I enjoy experimenting with coding, robotics, or digital tools.",
        primary: TECHNOLOGY,
        secondary: &[(DIGITAL, 0.4)],
    },
    Entry {
        id: "tech-4",
        text: "I am curious about inventing or improving technological solutions.",
        primary: TECHNOLOGY,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "enterprise-1",
        text: "I enjoy creating projects or small ventures from an idea.",
        primary: ENTERPRISE,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "enterprise-2",
        text: "I like taking the lead in solving challenges or making improvements.",
        primary: ENTERPRISE,
        secondary: &[(LEADERSHIP, 0.4)],
    },
    Entry {
        id: "enterprise-3",
        text: "I feel motivated to try new approaches or take calculated risks.",
        primary: ENTERPRISE,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "enterprise-4",
        text: "I enjoy finding creative solutions to everyday problems.",
        primary: ENTERPRISE,
        secondary: &[(CRITICAL, 0.4)],
    },
    Entry {
        id: "critical-1",
        text: "I enjoy analyzing why things work the way they do.",
        primary: CRITICAL,
        secondary: &[(SCIENCE, 0.4)],
    },
    Entry {
        id: "critical-2",
        text: "I like questioning assumptions to better understand a topic.",
        primary: CRITICAL,
        secondary: &[(LOGIC, 0.3)],
    },
    Entry {
        id: "critical-3",
        text: "I enjoy comparing different viewpoints before forming an opinion.",
        primary: CRITICAL,
        secondary: &[(EMOTIONAL, 0.3)],
    },
    Entry {
        id: "critical-4",
        text: "I reflect on my decisions to see how I could improve them.",
        primary: CRITICAL,
        secondary: &[(WELLBEING, 0.4)],
    },
    Entry {
        id: "emotional-1",
        text: "I notice how my actions affect other people.",
        primary: EMOTIONAL,
        secondary: &[(PEOPLE, 0.4)],
    },
    Entry {
        id: "emotional-2",
        text: "I enjoy helping friends solve personal or emotional challenges.",
        primary: EMOTIONAL,
        secondary: &[(PEOPLE, 0.5)],
    },
    Entry {
        id: "emotional-3",
        text: "I can understand someone else’s perspective easily.",
        primary: EMOTIONAL,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "emotional-4",
        text: "I am aware of my feelings and can manage them well.",
        primary: EMOTIONAL,
        secondary: &[(WELLBEING, 0.4)],
    },
    Entry {
        id: "digital-1",
        text: "I enjoy creating videos, music, or digital artwork.",
        primary: DIGITAL,
        secondary: &[(ARTS, 0.4)],
    },
    Entry {
        id: "digital-2",
        text: "I like experimenting with apps or tools to express myself creatively.",
        primary: DIGITAL,
        secondary: &[(TECHNOLOGY, 0.4)],
    },
    Entry {
        id: "digital-3",
        text: "I am interested in designing or editing digital content.",
        primary: DIGITAL,
        secondary: &[(ENTERPRISE, 0.3)],
    },
    Entry {
        id: "digital-4",
        text: "I enjoy combining technology and imagination to make something new.",
        primary: DIGITAL,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "science-1",
        text: "I enjoy designing experiments to see what happens.",
        primary: SCIENCE,
        secondary: &[(CRITICAL, 0.4)],
    },
    Entry {
        id: "science-2",
        text: "I ask questions to understand how things in nature or science work.",
        primary: SCIENCE,
        secondary: &[(NATURE, 0.4)],
    },
    Entry {
        id: "science-3",
        text: "I enjoy observing phenomena carefully and recording what I see.",
        primary: SCIENCE,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "science-4",
        text: "I like testing ideas to see if they really work.",
        primary: SCIENCE,
        secondary: &[(ENTERPRISE, 0.3)],
    },
    Entry {
        id: "leadership-1",
        text: "I enjoy organizing group activities or projects.",
        primary: LEADERSHIP,
        secondary: &[(PEOPLE, 0.4)],
    },
    Entry {
        id: "leadership-2",
        text: "I like guiding others to achieve a shared goal.",
        primary: LEADERSHIP,
        secondary: &[(ENTERPRISE, 0.3)],
    },
    Entry {
        id: "leadership-3",
        text: "I feel confident taking responsibility for team decisions.",
        primary: LEADERSHIP,
        secondary: &[(WELLBEING, 0.3)],
    },
    Entry {
        id: "leadership-4",
        text: "I enjoy helping a group work together smoothly.",
        primary: LEADERSHIP,
        secondary: &[(EMOTIONAL, 0.4)],
    },
    Entry {
        id: "wellbeing-1",
        text: "I enjoy practicing mindfulness or reflecting on my feelings.",
        primary: WELLBEING,
        secondary: &[(EMOTIONAL, 0.4)],
    },
    Entry {
        id: "wellbeing-2",
        text: "I pay attention to my wellbeing and daily habits.",
        primary: WELLBEING,
        secondary: &[(MOVEMENT, 0.4)],
    },
    Entry {
        id: "wellbeing-3",
        text: "I can stay focused and calm even in challenging situations.",
        primary: WELLBEING,
        secondary: &[(CRITICAL, 0.3)],
    },
    Entry {
        id: "wellbeing-4",
        text: "I take time to think about my strengths and areas I want to improve.",
        primary: WELLBEING,
        secondary: &[(CRITICAL, 0.4)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Statement;
    use std::collections::HashMap;

    #[test]
    fn builtin_bank_loads() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 60);
        assert_eq!(bank.dimensions().len(), 15);
    }

    #[test]
    fn every_dimension_leads_four_statements() {
        let mut per_primary: HashMap<&str, usize> = HashMap::new();
        for statement in QuestionBank::builtin().all_statements() {
            *per_primary.entry(statement.primary().as_str()).or_default() += 1;
        }
        assert_eq!(per_primary.len(), 15);
        assert!(per_primary.values().all(|count| *count == 4));
    }

    #[test]
    fn canonical_dimension_order_starts_with_first_authored() {
        let dims: Vec<&str> = QuestionBank::builtin()
            .dimensions()
            .iter()
            .take(4)
            .map(|dim| dim.as_str())
            .collect();
        assert_eq!(dims, vec![NATURE, SCIENCE, CRITICAL, EMOTIONAL]);
    }

    #[test]
    fn ids_are_grouped_by_primary_dimension() {
        let statement: &Statement = QuestionBank::builtin().statement("tech-3").unwrap();
        assert_eq!(statement.primary().as_str(), TECHNOLOGY);
        assert_eq!(statement.secondary()[0].0.as_str(), DIGITAL);
    }

    #[test]
    fn statement_text_keeps_typographic_apostrophe() {
        let statement = QuestionBank::builtin().statement("emotional-3").unwrap();
        assert_eq!(
            statement.text(),
            "I can understand someone else\u{2019}s perspective easily."
        );
    }
}
