//! State graph builder and executor.

use crate::workflow::error::WorkflowError;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Name routers return to finish the run.
pub const END: &str = "__end__";

pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Graph state: a map of keys to JSON values.
pub type State = HashMap<String, Value>;

type NodeFn = Arc<dyn Fn(&State) -> Result<State, String> + Send + Sync>;
type RouterFn = Arc<dyn Fn(&State) -> String + Send + Sync>;

#[derive(Clone)]
enum Edge {
    Direct(String),
    Conditional {
        router: RouterFn,
        targets: Vec<String>,
    },
}

/// Builder for a workflow graph.
///
/// # Example
///
/// ```
/// use ag_core::workflow::{StateGraph, END};
/// use serde_json::json;
///
/// let graph = StateGraph::new()
///     .add_node("shout", |state| {
///         let text = state["input"].as_str().unwrap_or_default().to_uppercase();
///         [("output".to_string(), json!(text))].into_iter().collect()
///     })
///     .set_entry_point("shout")
///     .add_edge("shout", END)
///     .compile()
///     .unwrap();
///
/// let state = graph
///     .invoke([("input".to_string(), json!("hi"))].into_iter().collect())
///     .unwrap();
/// assert_eq!(state["output"], json!("HI"));
/// ```
#[derive(Clone, Default)]
pub struct StateGraph {
    nodes: HashMap<String, NodeFn>,
    edges: Vec<(String, Edge)>,
    entry: Option<String>,
    recursion_limit: Option<usize>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node whose return value is merged into the state.
    pub fn add_node<F>(self, name: &str, node: F) -> Self
    where
        F: Fn(&State) -> State + Send + Sync + 'static,
    {
        self.add_fallible_node(name, move |state| Ok(node(state)))
    }

    /// Add a node that may fail with a message.
    pub fn add_fallible_node<F>(mut self, name: &str, node: F) -> Self
    where
        F: Fn(&State) -> Result<State, String> + Send + Sync + 'static,
    {
        self.nodes.insert(name.to_string(), Arc::new(node));
        self
    }

    /// Always continue from `from` to `to` (a node name or [`END`]).
    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        self.edges
            .push((from.to_string(), Edge::Direct(to.to_string())));
        self
    }

    /// Continue from `from` to whatever `router` returns.
    ///
    /// `targets` lists every name the router may return.
    pub fn add_conditional_edge<F, I, S>(mut self, from: &str, router: F, targets: I) -> Self
    where
        F: Fn(&State) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edges.push((
            from.to_string(),
            Edge::Conditional {
                router: Arc::new(router),
                targets: targets.into_iter().map(Into::into).collect(),
            },
        ));
        self
    }

    pub fn set_entry_point(mut self, name: &str) -> Self {
        self.entry = Some(name.to_string());
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Validate the wiring and produce an executable graph.
    pub fn compile(self) -> Result<CompiledGraph, WorkflowError> {
        let entry = self.entry.ok_or(WorkflowError::MissingEntryPoint)?;
        let known = |name: &str| name == END || self.nodes.contains_key(name);

        if !self.nodes.contains_key(&entry) {
            return Err(WorkflowError::UnknownNode(entry));
        }

        let mut edges = HashMap::new();
        for (from, edge) in self.edges {
            if !self.nodes.contains_key(&from) {
                return Err(WorkflowError::UnknownNode(from));
            }
            let targets: Vec<&String> = match &edge {
                Edge::Direct(to) => vec![to],
                Edge::Conditional { targets, .. } => targets.iter().collect(),
            };
            if let Some(unknown) = targets.into_iter().find(|t| !known(t)) {
                return Err(WorkflowError::UnknownNode(unknown.clone()));
            }
            if edges.insert(from.clone(), edge).is_some() {
                return Err(WorkflowError::DuplicateEdge(from));
            }
        }

        let wired: HashSet<&String> = edges.keys().collect();
        if let Some(dangling) = self.nodes.keys().find(|n| !wired.contains(n)) {
            return Err(WorkflowError::NoOutgoingEdge(dangling.clone()));
        }

        Ok(CompiledGraph {
            nodes: self.nodes,
            edges,
            entry,
            recursion_limit: self.recursion_limit.unwrap_or(DEFAULT_RECURSION_LIMIT),
        })
    }
}

/// A validated, executable workflow graph.
pub struct CompiledGraph {
    nodes: HashMap<String, NodeFn>,
    edges: HashMap<String, Edge>,
    entry: String,
    recursion_limit: usize,
}

impl CompiledGraph {
    /// Run the graph from its entry point until a node routes to [`END`].
    pub fn invoke(&self, mut state: State) -> Result<State, WorkflowError> {
        let mut current = self.entry.clone();

        for step in 0..self.recursion_limit {
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| WorkflowError::UnknownNode(current.clone()))?;

            debug!(node = %current, step, "running workflow node");
            let update = node(&state).map_err(|reason| WorkflowError::NodeFailed {
                node: current.clone(),
                reason,
            })?;
            state.extend(update);

            let next = match self.edges.get(&current) {
                Some(Edge::Direct(to)) => to.clone(),
                Some(Edge::Conditional { router, targets }) => {
                    let to = router(&state);
                    if !targets.contains(&to) {
                        return Err(WorkflowError::UnknownRoute { from: current, to });
                    }
                    to
                }
                None => return Err(WorkflowError::NoOutgoingEdge(current)),
            };

            if next == END {
                return Ok(state);
            }
            current = next;
        }

        Err(WorkflowError::RecursionLimit(self.recursion_limit))
    }

    pub fn entry_point(&self) -> &str {
        &self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state(pairs: &[(&str, Value)]) -> State {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn grading_graph() -> CompiledGraph {
        StateGraph::new()
            .add_node("grade", |s| {
                let score = s.get("score").and_then(Value::as_i64).unwrap_or(0);
                state(&[("passed", json!(score >= 50))])
            })
            .add_node("celebrate", |_| state(&[("output", json!("well done"))]))
            .add_node("retry", |_| state(&[("output", json!("try again"))]))
            .set_entry_point("grade")
            .add_conditional_edge(
                "grade",
                |s| {
                    if s.get("passed") == Some(&json!(true)) {
                        "celebrate".to_string()
                    } else {
                        "retry".to_string()
                    }
                },
                ["celebrate", "retry"],
            )
            .add_edge("celebrate", END)
            .add_edge("retry", END)
            .compile()
            .unwrap()
    }

    #[test]
    fn test_conditional_routing() {
        let graph = grading_graph();

        let result = graph.invoke(state(&[("score", json!(80))])).unwrap();
        assert_eq!(result["output"], json!("well done"));
        assert_eq!(result["score"], json!(80));

        let result = graph.invoke(state(&[("score", json!(10))])).unwrap();
        assert_eq!(result["output"], json!("try again"));
    }

    #[test]
    fn test_fixed_edges_run_in_sequence() {
        let graph = StateGraph::new()
            .add_node("a", |_| state(&[("trail", json!("a"))]))
            .add_node("b", |s| {
                let trail = format!("{}b", s["trail"].as_str().unwrap_or_default());
                state(&[("trail", json!(trail))])
            })
            .set_entry_point("a")
            .add_edge("a", "b")
            .add_edge("b", END)
            .compile()
            .unwrap();

        let result = graph.invoke(State::new()).unwrap();
        assert_eq!(result["trail"], json!("ab"));
        assert_eq!(graph.entry_point(), "a");
    }

    #[test]
    fn test_loop_hits_recursion_limit() {
        let graph = StateGraph::new()
            .add_node("spin", |s| {
                let n = s.get("n").and_then(Value::as_u64).unwrap_or(0);
                state(&[("n", json!(n + 1))])
            })
            .set_entry_point("spin")
            .add_edge("spin", "spin")
            .with_recursion_limit(5)
            .compile()
            .unwrap();

        assert_eq!(graph.invoke(State::new()), Err(WorkflowError::RecursionLimit(5)));
    }

    #[test]
    fn test_bounded_loop_terminates() {
        let graph = StateGraph::new()
            .add_node("count", |s| {
                let n = s.get("n").and_then(Value::as_u64).unwrap_or(0);
                state(&[("n", json!(n + 1))])
            })
            .set_entry_point("count")
            .add_conditional_edge(
                "count",
                |s| {
                    if s["n"].as_u64().unwrap_or(0) < 3 {
                        "count".to_string()
                    } else {
                        END.to_string()
                    }
                },
                ["count", END],
            )
            .compile()
            .unwrap();

        assert_eq!(graph.invoke(State::new()).unwrap()["n"], json!(3));
    }

    #[test]
    fn test_router_returning_undeclared_target() {
        let graph = StateGraph::new()
            .add_node("a", |_| State::new())
            .add_node("b", |_| State::new())
            .set_entry_point("a")
            .add_conditional_edge("a", |_| "b".to_string(), [END])
            .add_edge("b", END)
            .compile()
            .unwrap();

        assert!(matches!(
            graph.invoke(State::new()),
            Err(WorkflowError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn test_node_failure() {
        let graph = StateGraph::new()
            .add_fallible_node("fetch", |_| Err("vector store offline".to_string()))
            .set_entry_point("fetch")
            .add_edge("fetch", END)
            .compile()
            .unwrap();

        assert_eq!(
            graph.invoke(State::new()),
            Err(WorkflowError::NodeFailed {
                node: "fetch".to_string(),
                reason: "vector store offline".to_string()
            })
        );
    }

    #[test]
    fn test_compile_validation() {
        let missing_entry = StateGraph::new().add_node("a", |_| State::new()).compile();
        assert!(matches!(missing_entry, Err(WorkflowError::MissingEntryPoint)));

        let unknown_target = StateGraph::new()
            .add_node("a", |_| State::new())
            .set_entry_point("a")
            .add_edge("a", "nowhere")
            .compile();
        assert!(matches!(unknown_target, Err(WorkflowError::UnknownNode(n)) if n == "nowhere"));

        let dangling = StateGraph::new()
            .add_node("a", |_| State::new())
            .add_node("b", |_| State::new())
            .set_entry_point("a")
            .add_edge("a", END)
            .compile();
        assert!(matches!(dangling, Err(WorkflowError::NoOutgoingEdge(n)) if n == "b"));

        let duplicate = StateGraph::new()
            .add_node("a", |_| State::new())
            .set_entry_point("a")
            .add_edge("a", END)
            .add_edge("a", END)
            .compile();
        assert!(matches!(duplicate, Err(WorkflowError::DuplicateEdge(_))));
    }
}
