//! Dialogue playback for the narrative missions.
//!
//! Trees are static content; a `DialogueSession` walks one tree,
//! accumulating metric effects from the player's choices until it
//! reaches an ending node. Bad content never panics a session: invalid
//! choices and dangling links log and leave the session where it was.

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    dialogue_assets::{DialogueEnding, DialogueNode, DialogueTree},
    std::collections::HashMap,
};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<DialogueTree>::new(&["dialogue.ron"]));
    }
}

/// One play-through of a dialogue tree.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    tree: DialogueTree,
    current: String,
    /// Running metric values, seeded from the scenario's start values.
    pub metrics: HashMap<String, f32>,
    /// Last emotional-state changes, keyed by character id.
    pub moods: HashMap<String, String>,
}

impl DialogueSession {
    pub fn new(tree: DialogueTree, metrics: HashMap<String, f32>) -> Self {
        let current = tree.start.clone();
        Self {
            tree,
            current,
            metrics,
            moods: HashMap::new(),
        }
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    /// The node the session is on. `None` only when the tree's links are
    /// broken, which `validate_tree` catches ahead of time.
    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.tree.node(&self.current)
    }

    /// The ending reached, if the session is on a terminal node.
    pub fn ending(&self) -> Option<&DialogueEnding> {
        self.current_node().and_then(|node| node.ending.as_ref())
    }

    pub fn is_finished(&self) -> bool {
        self.ending().is_some()
    }

    /// Takes the choice at `index` on the current node: applies its
    /// metric effects and character reactions, then advances. Invalid
    /// indices and dangling targets log and leave the session in place.
    pub fn choose(&mut self, index: usize) {
        let Some(node) = self.tree.node(&self.current) else {
            error!(node = %self.current, "session is on a missing node");
            return;
        };
        let Some(choice) = node.choices.get(index) else {
            warn!(
                node = %self.current,
                index,
                available = node.choices.len(),
                "choice index out of range"
            );
            return;
        };
        if self.tree.node(&choice.next).is_none() {
            error!(
                node = %self.current,
                next = %choice.next,
                "choice leads to a missing node"
            );
            return;
        }

        for (metric, delta) in &choice.effects {
            *self.metrics.entry(metric.clone()).or_insert(0.0) += delta;
        }
        for (character, emotion) in &choice.reactions {
            self.moods.insert(character.clone(), emotion.clone());
        }
        trace!(from = %self.current, to = %choice.next, "dialogue advanced");
        self.current = choice.next.clone();
    }
}

/// Content check run over a tree before it ships: reports a missing
/// start node, dangling choice targets, ending nodes that still carry
/// choices, and nodes unreachable from the start.
pub fn validate_tree(tree: &DialogueTree) -> Vec<String> {
    let mut problems = Vec::new();

    if tree.node(&tree.start).is_none() {
        problems.push(format!("start node '{}' does not exist", tree.start));
    }

    for (id, node) in &tree.nodes {
        if node.is_ending() && !node.choices.is_empty() {
            problems.push(format!("ending node '{id}' has choices"));
        }
        if !node.is_ending() && node.choices.is_empty() {
            problems.push(format!("node '{id}' is a dead end"));
        }
        for choice in &node.choices {
            if tree.node(&choice.next).is_none() {
                problems.push(format!(
                    "node '{id}' links to missing node '{}'",
                    choice.next
                ));
            }
        }
    }

    let mut reachable = std::collections::HashSet::new();
    let mut stack = vec![tree.start.clone()];
    while let Some(id) = stack.pop() {
        if !reachable.insert(id.clone()) {
            continue;
        }
        if let Some(node) = tree.node(&id) {
            stack.extend(node.choices.iter().map(|c| c.next.clone()));
        }
    }
    for id in tree.nodes.keys() {
        if !reachable.contains(id) {
            problems.push(format!("node '{id}' is unreachable from the start"));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DialogueTree {
        ron::from_str(
            r#"(
            id: "sample",
            title: "Prov",
            start: "intro",
            nodes: {
                "intro": (
                    character: "arne",
                    text: "Jag vill klara mig själv.",
                    emotion: Some("orolig"),
                    choices: [
                        (
                            text: "Vi lyssnar på dig, Arne.",
                            effects: [("autonomy", 15.0), ("staff", -5.0)],
                            reactions: [("arne", "lättad")],
                            next: "slut",
                        ),
                        (
                            text: "Trygghet går först.",
                            effects: [("security", 20.0), ("autonomy", -10.0)],
                            next: "slut",
                        ),
                    ],
                ),
                "slut": (
                    character: "narrator",
                    text: "Mötet avslutas.",
                    ending: Some((outcome: "Konsensuslösningen", description: "Alla parter nöjda.")),
                ),
            },
        )"#,
        )
        .expect("tree should parse")
    }

    #[test]
    fn choices_accumulate_effects_and_reach_endings() {
        let mut session = DialogueSession::new(
            sample_tree(),
            HashMap::from([("autonomy".to_string(), 50.0)]),
        );
        assert!(!session.is_finished());

        session.choose(0);
        assert_eq!(session.metrics.get("autonomy"), Some(&65.0));
        assert_eq!(session.metrics.get("staff"), Some(&-5.0));
        assert_eq!(session.moods.get("arne"), Some(&"lättad".to_string()));
        assert!(session.is_finished());
        assert_eq!(
            session.ending().map(|e| e.outcome.as_str()),
            Some("Konsensuslösningen")
        );
    }

    #[test]
    fn invalid_choice_leaves_session_in_place() {
        let mut session = DialogueSession::new(sample_tree(), HashMap::new());
        session.choose(7);
        assert_eq!(session.current_id(), "intro");
        assert!(session.metrics.is_empty());

        // Choosing on an ending node is a no-op too.
        session.choose(0);
        assert!(session.is_finished());
        session.choose(0);
        assert_eq!(session.current_id(), "slut");
    }

    #[test]
    fn validate_flags_broken_links() {
        let broken: DialogueTree = ron::from_str(
            r#"(
            id: "broken",
            title: "Trasig",
            start: "a",
            nodes: {
                "a": (
                    character: "player",
                    text: "...",
                    choices: [(text: "Gå", next: "nowhere")],
                ),
                "island": (
                    character: "player",
                    text: "...",
                ),
            },
        )"#,
        )
        .expect("tree should parse");

        let problems = validate_tree(&broken);
        assert!(problems.iter().any(|p| p.contains("missing node 'nowhere'")));
        assert!(problems.iter().any(|p| p.contains("'island' is unreachable")));
        assert!(problems.iter().any(|p| p.contains("'island' is a dead end")));
    }

    #[test]
    fn shipped_welfare_tree_is_sound() {
        let tree: DialogueTree = ron::from_str(include_str!(
            "../../assets/dialogue/valfards_dilemma.dialogue.ron"
        ))
        .expect("shipped tree should parse");
        assert_eq!(validate_tree(&tree), Vec::<String>::new());

        // Every ending carries an outcome the scoring layer can match.
        for (id, node) in &tree.nodes {
            if let Some(ending) = &node.ending {
                assert!(!ending.outcome.is_empty(), "ending '{id}' has no outcome");
            }
        }
    }
}
