//! Strongly connected components over small index graphs.
//!
//! Used wherever a pass needs to order nodes by dependency or find cycles:
//! files by include, typedefs by alias, services by inheritance. Components
//! come out in reverse topological order (leaves first).

/// Tarjan's algorithm over nodes `0..edges.len()`.
///
/// - `sccs[0]` depends on nothing outside itself.
/// - Every node appears in exactly one component.
/// - Members of a component are sorted by index.
pub fn strongly_connected(edges: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut finder = SccFinder {
        edges,
        index: 0,
        stack: Vec::new(),
        on_stack: vec![false; edges.len()],
        indices: vec![None; edges.len()],
        lowlinks: vec![0; edges.len()],
        sccs: Vec::new(),
    };

    for node in 0..edges.len() {
        if finder.indices[node].is_none() {
            finder.strongconnect(node);
        }
    }

    finder.sccs
}

/// True if the component is a cycle: several members, or one that points
/// at itself.
pub fn is_cycle(scc: &[usize], edges: &[Vec<usize>]) -> bool {
    match scc {
        [] => false,
        [single] => edges[*single].contains(single),
        _ => true,
    }
}

/// Walk a cycle from its lowest member, following edges inside the
/// component, and return it closed (first member repeated at the end).
pub fn cycle_path(scc: &[usize], edges: &[Vec<usize>]) -> Vec<usize> {
    let Some(&start) = scc.first() else {
        return Vec::new();
    };

    let mut path = vec![start];
    let mut current = start;
    loop {
        let next = edges[current]
            .iter()
            .copied()
            .filter(|n| scc.contains(n))
            .find(|n| *n == start || !path.contains(n));
        match next {
            Some(n) if n == start => {
                path.push(start);
                return path;
            }
            Some(n) => {
                path.push(n);
                current = n;
            }
            // Dead end inside a tangled component; close it off here.
            None => {
                path.push(start);
                return path;
            }
        }
    }
}

struct SccFinder<'a> {
    edges: &'a [Vec<usize>],
    index: usize,
    stack: Vec<usize>,
    on_stack: Vec<bool>,
    indices: Vec<Option<usize>>,
    lowlinks: Vec<usize>,
    sccs: Vec<Vec<usize>>,
}

impl SccFinder<'_> {
    fn strongconnect(&mut self, node: usize) {
        self.indices[node] = Some(self.index);
        self.lowlinks[node] = self.index;
        self.index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;

        let edges = self.edges;
        for &next in &edges[node] {
            match self.indices[next] {
                None => {
                    self.strongconnect(next);
                    self.lowlinks[node] = self.lowlinks[node].min(self.lowlinks[next]);
                }
                Some(next_index) if self.on_stack[next] => {
                    self.lowlinks[node] = self.lowlinks[node].min(next_index);
                }
                Some(_) => {}
            }
        }

        if Some(self.lowlinks[node]) == self.indices[node] {
            let mut scc = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack[member] = false;
                scc.push(member);
                if member == node {
                    break;
                }
            }
            scc.sort_unstable();
            self.sccs.push(scc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_come_first() {
        // 0 -> 1 -> 2
        let edges = vec![vec![1], vec![2], vec![]];
        assert_eq!(strongly_connected(&edges), vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn cycle_forms_one_component() {
        // 0 -> 1 -> 0, 2 -> 0
        let edges = vec![vec![1], vec![0], vec![0]];
        let sccs = strongly_connected(&edges);
        assert_eq!(sccs, vec![vec![0, 1], vec![2]]);
        assert!(is_cycle(&sccs[0], &edges));
        assert!(!is_cycle(&sccs[1], &edges));
        assert_eq!(cycle_path(&sccs[0], &edges), vec![0, 1, 0]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let edges = vec![vec![0]];
        let sccs = strongly_connected(&edges);
        assert!(is_cycle(&sccs[0], &edges));
        assert_eq!(cycle_path(&sccs[0], &edges), vec![0, 0]);
    }
}
