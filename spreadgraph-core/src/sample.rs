//! Built-in ten-person community, used when no network is configured.

use crate::model::SocialGraph;

pub const SAMPLE_PEOPLE: [&str; 10] = [
    "Patryk", "Kasia", "Kajetan", "Ania", "Artur", "Karolina", "Tomek", "Klaudia", "Krzysiek",
    "Asia",
];

pub const SAMPLE_CONNECTIONS: [(&str, &str); 15] = [
    ("Patryk", "Kasia"),
    ("Patryk", "Kajetan"),
    ("Patryk", "Ania"),
    ("Patryk", "Artur"),
    ("Kasia", "Karolina"),
    ("Kasia", "Tomek"),
    ("Kajetan", "Klaudia"),
    ("Kajetan", "Krzysiek"),
    ("Ania", "Asia"),
    ("Ania", "Krzysiek"),
    ("Artur", "Karolina"),
    ("Artur", "Tomek"),
    ("Karolina", "Klaudia"),
    ("Klaudia", "Krzysiek"),
    ("Krzysiek", "Asia"),
];

pub const SAMPLE_START: &str = "Patryk";

pub fn sample_community() -> SocialGraph {
    SocialGraph::from_parts(SAMPLE_PEOPLE, SAMPLE_CONNECTIONS)
}
