use super::annotate::StepAnnotator;
use super::index::ConnectionIndex;
use super::preprocess::PreparedGraph;
use crate::config::LinearizerConfig;
use crate::plan::TraversalReport;
use crate::step::{ReturnStep, Step, TaskStep};
use ahash::AHashSet;
use tracing::{debug, trace, warn};

/// Depth-first walk over the primary flow that emits the build order.
///
/// Node state is tracked in three sets: `in_progress` (on the current DFS
/// stack), `finalized` (visited through the primary flow) and `emitted` (has
/// produced its step). A dependency provider can be emitted long before it is
/// finalized, so the last two are kept apart.
pub(crate) struct Traversal<'a, 'g> {
    graph: &'a PreparedGraph<'g>,
    index: &'a ConnectionIndex<'g>,
    config: &'a LinearizerConfig,
    annotator: StepAnnotator<'a, 'g>,
    in_progress: AHashSet<&'g str>,
    finalized: AHashSet<&'g str>,
    emitted: AHashSet<&'g str>,
    steps: Vec<Step>,
    report: TraversalReport,
}

/// How the fallback sweep ended.
enum Recovery {
    Complete,
    Deadlocked,
    BudgetExhausted,
}

impl<'a, 'g> Traversal<'a, 'g> {
    pub fn new(
        graph: &'a PreparedGraph<'g>,
        index: &'a ConnectionIndex<'g>,
        config: &'a LinearizerConfig,
    ) -> Self {
        Self {
            graph,
            index,
            config,
            annotator: StepAnnotator::new(index, config),
            in_progress: AHashSet::new(),
            finalized: AHashSet::with_capacity(graph.nodes.len()),
            emitted: AHashSet::with_capacity(graph.nodes.len()),
            steps: Vec::with_capacity(graph.nodes.len()),
            report: TraversalReport::default(),
        }
    }

    /// Runs the walk from every entry point, then the fallback sweep, then numbers the steps.
    pub fn run(mut self) -> (Vec<Step>, TraversalReport) {
        let graph = self.graph;
        let index = self.index;

        // Pure capability providers are pulled in front of their consumers instead.
        let entry_points: Vec<&'g str> = graph
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| index.parents(id).is_empty() && !index.is_pure_provider(id))
            .collect();
        debug!(count = entry_points.len(), "Starting traversal from entry points");
        self.report.entry_points = entry_points.len();

        for id in entry_points {
            self.visit(id);
        }

        match self.recover() {
            Recovery::Complete => {}
            Recovery::Deadlocked | Recovery::BudgetExhausted => self.force_remaining(),
        }

        for (position, step) in self.steps.iter_mut().enumerate() {
            step.set_step_number(position + 1);
        }
        (self.steps, self.report)
    }

    fn visit(&mut self, id: &'g str) {
        if self.finalized.contains(id) || self.in_progress.contains(id) {
            return;
        }

        let index = self.index;
        let parents = index.parents(id);
        if parents.len() >= 2 && !parents.iter().all(|p| self.finalized.contains(p)) {
            // The last producer to finish will come back here.
            trace!(node = id, "Deferring merge point until all producers are built");
            return;
        }

        self.in_progress.insert(id);
        self.finalized.insert(id);
        self.emit_with_dependencies(id);

        match index.children(id) {
            [] => {}
            [only] => self.visit(*only),
            children => {
                let branching = self.is_true_branching(id);
                let mut built = 0;
                for child in children {
                    let start = self.steps.len();
                    if branching && built > 0 {
                        self.emit_return(id, built - 1);
                    }
                    let branch_start = self.steps.len();
                    self.visit(*child);
                    if self.steps.len() == branch_start {
                        // Nothing left to build on this branch: drop its return step.
                        self.steps.truncate(start);
                    } else {
                        built += 1;
                    }
                }
            }
        }

        self.in_progress.remove(id);
    }

    fn is_true_branching(&self, id: &str) -> bool {
        let by_type = self
            .graph
            .node(id)
            .is_some_and(|n| self.config.is_branching(&n.node_type));
        by_type || self.index.has_branching_outputs(id)
    }

    /// Emits the node's step, preceded by any providers feeding it through auxiliary edges.
    fn emit_with_dependencies(&mut self, id: &'g str) {
        if self.emitted.contains(id) {
            return;
        }
        let index = self.index;
        for &provider in index.dependencies(id) {
            self.emit_provider(provider);
        }
        // A provider cycle can lead back to this node.
        if !self.emitted.contains(id) {
            self.emit_task(id, false);
        }
    }

    /// Emits a pulled provider as a dependency step.
    ///
    /// A pure provider first pulls the pure providers feeding it, so chains such
    /// as embeddings -> vector store -> agent come out in order. A provider that
    /// also sits on the primary flow is emitted alone.
    fn emit_provider(&mut self, id: &'g str) {
        if self.emitted.contains(id) || !self.in_progress.insert(id) {
            return;
        }
        let index = self.index;
        if index.is_pure_provider(id) {
            for &upstream in index.dependencies(id) {
                if index.is_pure_provider(upstream) {
                    self.emit_provider(upstream);
                }
            }
        }
        if !self.emitted.contains(id) {
            self.emit_task(id, true);
        }
        self.in_progress.remove(id);
    }

    fn emit_task(&mut self, id: &'g str, is_dependency: bool) {
        let Some(node) = self.graph.node(id) else {
            return;
        };
        trace!(node = %node.name, is_dependency, "Emitting step");
        self.steps.push(Step::Task(TaskStep {
            step_number: 0,
            node: node.clone(),
            is_trigger: self.config.is_trigger(&node.node_type),
            is_merge_node: self.index.is_merge_point(id),
            is_dependency,
            connection_info: self.annotator.for_node(node),
        }));
        self.emitted.insert(id);
    }

    fn emit_return(&mut self, id: &str, branch: usize) {
        let Some(node) = self.graph.node(id) else {
            return;
        };
        trace!(node = %node.name, branch, "Emitting return step");
        self.steps.push(Step::Return(ReturnStep {
            step_number: 0,
            id: format!("{}_return_{}", node.id, branch),
            name: node.name.clone(),
            node_type: node.node_type.clone(),
            position: node.position,
            return_to_node_name: node.name.clone(),
            connection_info: self.annotator.for_return(&node.name),
        }));
    }

    /// Repeatedly visits unfinalized nodes whose producers are all finalized.
    ///
    /// Each sweep that makes progress finalizes at least one node, and the number
    /// of sweeps is capped at twice the node count.
    fn recover(&mut self) -> Recovery {
        let graph = self.graph;
        let budget = 2 * graph.nodes.len();

        loop {
            let pending: Vec<&'g str> = graph
                .nodes
                .iter()
                .map(|n| n.id.as_str())
                .filter(|id| !self.finalized.contains(id))
                .collect();
            if pending.is_empty() {
                return Recovery::Complete;
            }
            if self.report.fallback_sweeps >= budget {
                warn!(budget, "Fallback sweep budget exhausted");
                return Recovery::BudgetExhausted;
            }

            self.report.fallback_sweeps += 1;
            let before = self.finalized.len();
            for id in pending {
                if self.is_ready(id) {
                    self.visit(id);
                }
            }
            debug!(
                sweep = self.report.fallback_sweeps,
                finalized = self.finalized.len() - before,
                "Fallback sweep finished"
            );

            if self.finalized.len() == before {
                return Recovery::Deadlocked;
            }
        }
    }

    fn is_ready(&self, id: &str) -> bool {
        if self.finalized.contains(id) {
            return false;
        }
        let producers_done = self
            .index
            .parents(id)
            .iter()
            .all(|p| self.finalized.contains(p));
        let waiting_on_consumer = self.index.is_pure_provider(id)
            && self
                .index
                .consumers(id)
                .iter()
                .any(|c| !self.emitted.contains(c));
        producers_done && !waiting_on_consumer
    }

    /// Emits every remaining node in document order without following its edges.
    ///
    /// Pure providers go last so that a consumer still pulls them in front of itself.
    fn force_remaining(&mut self) {
        let graph = self.graph;
        let index = self.index;
        let (providers, others): (Vec<&'g str>, Vec<&'g str>) = graph
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !self.finalized.contains(id))
            .partition(|id| index.is_pure_provider(id));

        warn!(
            count = providers.len() + others.len(),
            "Traversal could not order every node, emitting the rest in document order"
        );
        for id in others.into_iter().chain(providers) {
            if !self.finalized.insert(id) {
                continue;
            }
            self.emit_with_dependencies(id);
            self.report.forced_nodes.push(id.to_string());
        }
    }
}
