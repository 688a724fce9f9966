//! Depth-first topological ordering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order nodes so every node comes after all of its dependencies.
///
/// `deps[n]` lists the nodes `n` depends on. Roots are visited in index
/// order and each node's dependencies in the order given, so the result is
/// deterministic. On a cycle, returns the cycle path with the repeated
/// node at both ends.
pub(crate) fn topological_order(deps: &[Vec<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; deps.len()];
    let mut order = Vec::with_capacity(deps.len());
    // (node, index of the next dependency to visit); doubles as the DFS path
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..deps.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some((node, next)) = stack.last_mut() {
            let node = *node;
            let Some(&dep) = deps[node].get(*next) else {
                stack.pop();
                marks[node] = Mark::Done;
                order.push(node);
                continue;
            };
            *next += 1;

            match marks[dep] {
                Mark::Done => {}
                Mark::InProgress => return Err(cycle_path(&stack, dep)),
                Mark::Unvisited => {
                    marks[dep] = Mark::InProgress;
                    stack.push((dep, 0));
                }
            }
        }
    }

    Ok(order)
}

/// The path from `node`'s frame to the top of the stack, closed with `node`.
fn cycle_path(stack: &[(usize, usize)], node: usize) -> Vec<usize> {
    let start = stack.iter().position(|&(n, _)| n == node).unwrap_or(0);
    let mut cycle: Vec<usize> = stack[start..].iter().map(|&(n, _)| n).collect();
    cycle.push(node);
    cycle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(topological_order(&[]), Ok(vec![]));
    }

    #[test]
    fn test_independent_nodes_keep_index_order() {
        let deps = vec![vec![], vec![], vec![]];
        assert_eq!(topological_order(&deps), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn test_dependency_moves_ahead() {
        // 0 depends on 1
        let deps = vec![vec![1], vec![]];
        assert_eq!(topological_order(&deps), Ok(vec![1, 0]));
    }

    #[test]
    fn test_diamond() {
        // 3 -> {1, 2} -> 0
        let deps = vec![vec![], vec![0], vec![0], vec![1, 2]];
        assert_eq!(topological_order(&deps), Ok(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_dependency_free_node_keeps_relative_position() {
        // 0 depends on 2, 1 is free
        let deps = vec![vec![2], vec![], vec![]];
        assert_eq!(topological_order(&deps), Ok(vec![2, 0, 1]));
    }

    #[test]
    fn test_two_node_cycle() {
        let deps = vec![vec![1], vec![0]];
        assert_eq!(topological_order(&deps), Err(vec![0, 1, 0]));
    }

    #[test]
    fn test_self_cycle() {
        let deps = vec![vec![], vec![1]];
        assert_eq!(topological_order(&deps), Err(vec![1, 1]));
    }

    #[test]
    fn test_cycle_path_excludes_entry_nodes() {
        // 0 -> 1 -> 2 -> 1
        let deps = vec![vec![1], vec![2], vec![1]];
        assert_eq!(topological_order(&deps), Err(vec![1, 2, 1]));
    }

    #[test]
    fn test_long_chain() {
        // n depends on n + 1
        let n = 200_000;
        let deps: Vec<Vec<usize>> = (0..n)
            .map(|i| if i + 1 < n { vec![i + 1] } else { vec![] })
            .collect();

        let order = topological_order(&deps).unwrap();
        assert_eq!(order.len(), n);
        assert_eq!(order[0], n - 1);
        assert_eq!(order[n - 1], 0);
    }

    #[test]
    fn test_cycle_at_end_of_long_chain() {
        let n = 100_000;
        let mut deps: Vec<Vec<usize>> = (0..n).map(|i| vec![i + 1]).collect();
        deps[n - 1] = vec![n - 2];

        assert_eq!(topological_order(&deps), Err(vec![n - 2, n - 1, n - 2]));
    }
}
