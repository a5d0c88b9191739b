//! Evaluation order of assignment rules.

use std::collections::BTreeSet;

/// Order rules so each is evaluated after the rules it reads.
///
/// `dependencies[i]` lists the rules whose targets rule `i` references.
/// Ties are broken by registration order. On failure, returns every cycle
/// found, each as a path of rule indices starting at its lowest index.
pub fn rule_order(dependencies: &[Vec<usize>]) -> Result<Vec<usize>, Vec<Vec<usize>>> {
    let n = dependencies.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (rule, deps) in dependencies.iter().enumerate() {
        let unique: BTreeSet<usize> = deps.iter().copied().filter(|&d| d < n).collect();
        in_degree[rule] = unique.len();
        for dep in unique {
            dependents[dep].push(rule);
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(rule) = ready.pop_first() {
        order.push(rule);
        for &dependent in &dependents[rule] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() == n {
        return Ok(order);
    }

    let remaining: Vec<bool> = in_degree.iter().map(|&d| d > 0).collect();
    Err(find_cycles(dependencies, &remaining))
}

/// Every remaining rule has a remaining dependency, so walking
/// dependencies from any of them must revisit a rule.
fn find_cycles(dependencies: &[Vec<usize>], remaining: &[bool]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; remaining.len()];
    let mut cycles = Vec::new();

    for start in 0..remaining.len() {
        if !remaining[start] || visited[start] {
            continue;
        }
        let mut path: Vec<usize> = Vec::new();
        let mut current = start;
        loop {
            if let Some(pos) = path.iter().position(|&r| r == current) {
                let mut cycle = path[pos..].to_vec();
                if let Some(min_at) = cycle.iter().enumerate().min_by_key(|(_, r)| **r).map(|(i, _)| i) {
                    cycle.rotate_left(min_at);
                }
                cycles.push(cycle);
                break;
            }
            if visited[current] {
                break;
            }
            visited[current] = true;
            path.push(current);
            match dependencies[current].iter().copied().find(|&d| remaining[d]) {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    cycles
}
