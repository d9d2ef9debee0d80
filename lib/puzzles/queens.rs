//! Count the placements of `n` non-attacking queens on an `n x n` board.
//!
//! A placement is encoded as `cols[row]`, the column of the queen on each row.
//! Taking `cols` to be a permutation of `0..n` already rules out shared rows
//! and columns, so only the diagonals need to be checked. This is a brute force
//! over all `n!` permutations and only practical up to `n` of ten or so.

use itertools::Itertools;

/// Return `true` if no two queens in the placement share a diagonal.
pub fn is_clear(cols: &[usize]) -> bool {
    return cols.iter().enumerate()
        .tuple_combinations()
        .all(|((i, ci), (j, cj))| ci.abs_diff(*cj) != j - i);
}

/// Count all solutions for an `n x n` board.
pub fn count_solutions(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    return (0..n).permutations(n)
        .filter(|cols| is_clear(cols))
        .count();
}

/// Return every solution for an `n x n` board, in lexicographic order.
pub fn solutions(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![Vec::new()];
    }
    return (0..n).permutations(n)
        .filter(|cols| is_clear(cols))
        .collect();
}

/// Render a placement as rows of `.` and `Q`.
pub fn render(cols: &[usize]) -> String {
    return cols.iter()
        .map(|c| {
            (0..cols.len())
                .map(|k| if k == *c { 'Q' } else { '.' })
                .collect::<String>()
        })
        .join("\n");
}
