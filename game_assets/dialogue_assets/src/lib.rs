use {
    bevy::prelude::*,
    serde::Deserialize,
    std::collections::HashMap,
};

/// A dialogue scene: a directed graph of nodes traversed by id lookup.
/// Not necessarily acyclic — choices may loop back.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct DialogueTree {
    pub id: String,
    pub title: String,
    /// Id of the entry node.
    pub start: String,
    pub nodes: HashMap<String, DialogueNode>,
}

impl DialogueTree {
    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueNode {
    /// Speaking character id ("arne", "karin", "player", "narrator").
    pub character: String,
    pub text: String,
    /// Emotional-state tag driving the character portrait.
    #[serde(default)]
    pub emotion: Option<String>,
    /// Scene-setting text shown alongside the line.
    #[serde(default)]
    pub narration: Option<String>,
    #[serde(default)]
    pub choices: Vec<DialogueChoice>,
    /// Present on terminal nodes. Ending nodes carry no choices.
    #[serde(default)]
    pub ending: Option<DialogueEnding>,
}

impl DialogueNode {
    pub fn is_ending(&self) -> bool {
        self.ending.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueChoice {
    pub text: String,
    /// Metric deltas applied when the choice is taken, keyed by metric id.
    #[serde(default)]
    pub effects: Vec<(String, f32)>,
    /// Emotional-state changes per character id.
    #[serde(default)]
    pub reactions: Vec<(String, String)>,
    /// Id of the node this choice leads to. Must resolve.
    pub next: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DialogueEnding {
    /// Outcome name fed into scenario tier matching.
    pub outcome: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_ron_parses() {
        let tree: DialogueTree = ron::from_str(
            r#"(
            id: "test_scene",
            title: "Test",
            start: "a",
            nodes: {
                "a": (
                    character: "player",
                    text: "Hej",
                    choices: [
                        (text: "Vidare", effects: [("autonomy", 10.0)], next: "b"),
                    ],
                ),
                "b": (
                    character: "narrator",
                    text: "Slut",
                    ending: Some((outcome: "Konsensus", description: "Klart")),
                ),
            },
        )"#,
        )
        .expect("tree should parse");

        assert_eq!(tree.node("a").unwrap().choices.len(), 1);
        assert!(tree.node("b").unwrap().is_ending());
        assert!(tree.node("missing").is_none());
    }
}
