use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::errors::{Result, WikiError};

use super::observer::Observer;
use super::value::Value;

/// Node definition: maps input values, in declared order, to the node value
pub type Definition = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Resolved builtins, keyed by name; `None` marks a name no provider knows
pub(crate) type Builtins = HashMap<String, Option<Result<Value>>>;

/// Handle to a module inside a [`Runtime`](super::Runtime)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module{}", self.0)
    }
}

/// Settlement state of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Pending,
    Fulfilled(Value),
    Rejected(WikiError),
}

impl NodeState {
    pub fn is_pending(&self) -> bool {
        matches!(self, NodeState::Pending)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            NodeState::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WikiError> {
        match self {
            NodeState::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

struct Node {
    name: String,
    inputs: Vec<String>,
    definition: Definition,
    observer: Option<Box<dyn Observer>>,
    state: NodeState,
    stale: bool,
}

/// Tally of one settle pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeReport {
    /// Nodes whose state was recomputed
    pub evaluated: usize,
    /// Of those, nodes that ended rejected
    pub rejected: usize,
}

impl ComputeReport {
    pub(crate) fn merge(&mut self, other: ComputeReport) {
        self.evaluated += other.evaluated;
        self.rejected += other.rejected;
    }
}

/// Module - a namespace of reactive nodes
///
/// Node names are not required to be unique when defined; a duplicated name
/// is detected when the module settles, and rejects every node carrying it.
pub struct Module {
    id: ModuleId,
    nodes: Vec<Node>,
}

impl Module {
    pub(crate) fn new(id: ModuleId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Define a node
    ///
    /// The node starts pending and stale, and so does every node that reads
    /// `name`.
    pub fn define<I, S, F>(&mut self, name: impl Into<String>, inputs: I, definition: F) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        self.nodes.push(Node {
            name: name.clone(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            definition: Arc::new(definition),
            observer: None,
            state: NodeState::Pending,
            stale: true,
        });
        self.invalidate(&name);
        self
    }

    /// Define a node with no inputs and a fixed value
    pub fn constant(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.define(name, Vec::<String>::new(), move |_| Ok(value.clone()))
    }

    /// Replace the inputs and definition of an existing node
    ///
    /// The node keeps its observer and its last settled state until the
    /// next compute.
    ///
    /// # Errors
    ///
    /// Returns `WikiError::NodeNotFound` if no node has this name.
    pub fn redefine<I, S, F>(&mut self, name: &str, inputs: I, definition: F) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let node = self.node_mut(name)?;
        node.inputs = inputs.into_iter().map(Into::into).collect();
        node.definition = Arc::new(definition);
        self.invalidate(name);
        Ok(())
    }

    /// Attach an observer to the first node named `name`
    ///
    /// # Errors
    ///
    /// Returns `WikiError::NodeNotFound` if no node has this name.
    pub fn observe(&mut self, name: &str, observer: Box<dyn Observer>) -> Result<()> {
        self.node_mut(name)?.observer = Some(observer);
        Ok(())
    }

    /// State of the first node named `name`
    pub fn state(&self, name: &str) -> Option<&NodeState> {
        self.nodes.iter().find(|n| n.name == name).map(|n| &n.state)
    }

    /// Fulfilled value of the first node named `name`
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.state(name).and_then(NodeState::value)
    }

    pub fn inputs(&self, name: &str) -> Option<&[String]> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| n.inputs.as_slice())
    }

    /// Node names in definition order, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether any node awaits recomputation
    pub fn is_stale(&self) -> bool {
        self.nodes.iter().any(|n| n.stale)
    }

    fn node_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.name == name)
            .ok_or_else(|| WikiError::NodeNotFound {
                node: name.to_string(),
            })
    }

    /// Mark `name` and everything downstream of it stale
    fn invalidate(&mut self, name: &str) {
        let mut queue = vec![name.to_string()];
        let mut seen = HashSet::new();
        while let Some(current) = queue.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            for node in &mut self.nodes {
                if node.name == current {
                    node.stale = true;
                } else if node.inputs.iter().any(|i| *i == current) {
                    node.stale = true;
                    queue.push(node.name.clone());
                }
            }
        }
    }

    /// Stale-node inputs that no node in this module defines
    pub(crate) fn external_inputs(&self) -> HashSet<String> {
        let defined: HashSet<&str> = self.names().collect();
        self.nodes
            .iter()
            .filter(|n| n.stale)
            .flat_map(|n| n.inputs.iter())
            .filter(|i| !defined.contains(i.as_str()))
            .cloned()
            .collect()
    }

    /// Kahn ordering over all nodes; returns the order and the nodes left
    /// over because they sit on or behind a cycle
    fn topological_order(&self) -> (Vec<usize>, Vec<usize>) {
        let n = self.nodes.len();
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            by_name.entry(node.name.as_str()).or_default().push(i);
        }

        let mut indegree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (j, node) in self.nodes.iter().enumerate() {
            for input in &node.inputs {
                for &k in by_name.get(input.as_str()).into_iter().flatten() {
                    dependents[k].push(j);
                    indegree[j] += 1;
                }
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(i) = queue.pop_front() {
            order.push(i);
            for &j in &dependents[i] {
                indegree[j] -= 1;
                if indegree[j] == 0 {
                    queue.push_back(j);
                }
            }
        }

        let blocked = (0..n).filter(|&i| indegree[i] > 0).collect();
        (order, blocked)
    }

    /// Recompute every stale node
    pub(crate) fn settle(&mut self, builtins: &Builtins) -> ComputeReport {
        let mut report = ComputeReport::default();
        if !self.is_stale() {
            return report;
        }

        for node in self.nodes.iter_mut().filter(|n| n.stale) {
            if let Some(observer) = node.observer.as_mut() {
                observer.pending(&node.name);
            }
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for node in &self.nodes {
            *counts.entry(node.name.clone()).or_default() += 1;
        }

        let (order, blocked) = self.topological_order();
        for i in blocked {
            if self.nodes[i].stale {
                let err = WikiError::CycleDetected {
                    node: self.nodes[i].name.clone(),
                };
                self.settle_node(i, Err(err), &mut report);
            }
        }
        for i in order {
            if self.nodes[i].stale {
                let result = self.evaluate(i, &counts, builtins);
                self.settle_node(i, result, &mut report);
            }
        }
        report
    }

    fn evaluate(&self, i: usize, counts: &HashMap<String, usize>, builtins: &Builtins) -> Result<Value> {
        let node = &self.nodes[i];
        if counts.get(&node.name).copied().unwrap_or(0) > 1 {
            return Err(WikiError::DuplicateDefinition {
                node: node.name.clone(),
            });
        }

        let mut values = Vec::with_capacity(node.inputs.len());
        for input in &node.inputs {
            match counts.get(input) {
                Some(&count) if count > 1 => {
                    return Err(WikiError::DuplicateDefinition {
                        node: input.clone(),
                    })
                }
                Some(_) => {
                    match self.state(input) {
                        Some(NodeState::Fulfilled(value)) => values.push(value.clone()),
                        Some(NodeState::Rejected(err)) => return Err(err.clone()),
                        Some(NodeState::Pending) | None => {
                            return Err(WikiError::Internal {
                                message: format!("{} evaluated before its input {}", node.name, input),
                            })
                        }
                    }
                }
                None => match builtins.get(input) {
                    Some(Some(Ok(value))) => values.push(value.clone()),
                    Some(Some(Err(err))) => return Err(err.clone()),
                    _ => {
                        return Err(WikiError::UnresolvedInput {
                            node: node.name.clone(),
                            input: input.clone(),
                        })
                    }
                },
            }
        }

        (node.definition)(&values)
    }

    fn settle_node(&mut self, i: usize, result: Result<Value>, report: &mut ComputeReport) {
        let node = &mut self.nodes[i];
        report.evaluated += 1;
        node.stale = false;
        node.state = match result {
            Ok(value) => NodeState::Fulfilled(value),
            Err(err) => {
                report.rejected += 1;
                tracing::debug!(node = %node.name, error = %err, "node rejected");
                NodeState::Rejected(err)
            }
        };

        if let Some(observer) = node.observer.as_mut() {
            match &node.state {
                NodeState::Fulfilled(value) => observer.fulfilled(&node.name, value),
                NodeState::Rejected(err) => observer.rejected(&node.name, err),
                NodeState::Pending => {}
            }
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("id", &self.id)
            .field("nodes", &self.nodes.iter().map(|n| &n.name).collect::<Vec<_>>())
            .finish()
    }
}
