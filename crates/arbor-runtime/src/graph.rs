//! Dependency graph, topological order, cycle detection
//!
//! Descriptors become an index-addressed directed graph. The construction
//! order is a topological order computed with an iterative three-color
//! depth-first traversal; nothing recurses, so deep graphs cannot overflow
//! the stack. Roots and neighbors are visited in registration order, which
//! makes the order (and any cycle report) deterministic.

use arbor_domain::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::registry::DescriptorRegistry;

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    White,
    Grey,
    Black,
}

/// Validated dependency graph with its construction order
pub struct DependencyGraph {
    names: Vec<String>,
    /// `edges[i]` lists the indices component `i` depends on
    edges: Vec<Vec<usize>>,
    /// Topological order, dependencies first
    order: Vec<usize>,
}

impl DependencyGraph {
    /// Build and validate the graph from the registry
    ///
    /// Fails fast on the first unresolved dependency or cycle; nothing is
    /// instantiated before this succeeds.
    pub fn build(registry: &DescriptorRegistry) -> Result<Self> {
        let names: Vec<String> = registry.iter().map(|d| d.name.to_string()).collect();

        let mut edges: Vec<Vec<usize>> = Vec::with_capacity(names.len());
        for descriptor in registry.iter() {
            let mut deps = Vec::with_capacity(descriptor.dependencies.len());
            for dep in descriptor.dependencies {
                let index = registry.index_of(dep).ok_or_else(|| {
                    Error::UnresolvedDependency {
                        dependency: (*dep).to_string(),
                        requester: descriptor.name.to_string(),
                    }
                })?;
                deps.push(index);
            }
            edges.push(deps);
        }

        let order = topological_order(&names, &edges)?;
        debug!(components = names.len(), "Dependency graph validated");

        Ok(Self {
            names,
            edges,
            order,
        })
    }

    /// Component names in construction order, dependencies first
    pub fn construction_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&i| self.names[i].as_str())
    }

    /// Component names in destruction order: exact reverse of construction
    pub fn destruction_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().rev().map(|&i| self.names[i].as_str())
    }

    /// Number of components in the graph
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the graph is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Nested view of direct and transitive dependencies per component
    ///
    /// Components with dependencies map to a nested object; leaves appear
    /// as `true`. Mirrors the declared edges exactly, so it doubles as a
    /// verification surface in tests.
    pub fn dependency_tree(&self) -> Value {
        // Construction order guarantees subtrees exist before their dependents
        let mut subtrees: Vec<Value> = vec![Value::Null; self.names.len()];
        for &i in &self.order {
            if self.edges[i].is_empty() {
                continue;
            }
            let mut entry = Map::new();
            for &dep in &self.edges[i] {
                let value = if self.edges[dep].is_empty() {
                    Value::Bool(true)
                } else {
                    subtrees[dep].clone()
                };
                entry.insert(self.names[dep].clone(), value);
            }
            subtrees[i] = Value::Object(entry);
        }

        let mut tree = Map::new();
        for (i, name) in self.names.iter().enumerate() {
            if !self.edges[i].is_empty() {
                tree.insert(name.clone(), subtrees[i].clone());
            }
        }
        Value::Object(tree)
    }
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("components", &self.names.len())
            .field("edges", &self.edges.iter().map(Vec::len).sum::<usize>())
            .finish_non_exhaustive()
    }
}

/// Iterative three-color depth-first topological sort
fn topological_order(names: &[String], edges: &[Vec<usize>]) -> Result<Vec<usize>> {
    let mut mark = vec![Mark::White; names.len()];
    let mut order = Vec::with_capacity(names.len());

    for root in 0..names.len() {
        if mark[root] != Mark::White {
            continue;
        }
        mark[root] = Mark::Grey;
        // (node, next neighbor offset) frames replace the call stack
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            if next < edges[node].len() {
                frame.1 += 1;
                let dep = edges[node][next];
                match mark[dep] {
                    Mark::White => {
                        mark[dep] = Mark::Grey;
                        stack.push((dep, 0));
                    }
                    Mark::Grey => {
                        // Closed walk: everything on the stack from `dep` up,
                        // with the entry point repeated to close it
                        let mut cycle: Vec<String> = stack
                            .iter()
                            .skip_while(|&&(i, _)| i != dep)
                            .map(|&(i, _)| names[i].clone())
                            .collect();
                        cycle.push(names[dep].clone());
                        return Err(Error::CyclicDependency { cycle });
                    }
                    Mark::Black => {}
                }
            } else {
                mark[node] = Mark::Black;
                order.push(node);
                stack.pop();
            }
        }
    }

    Ok(order)
}
