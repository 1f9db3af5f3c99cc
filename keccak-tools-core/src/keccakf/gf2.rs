//! Linear systems over GF(2), rows kept as bit vectors.

/// A row of an augmented matrix: `n` coefficient bits followed by the right-hand side bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equation {
    bits: Vec<u64>,
}

impl Equation {
    pub fn new(n: usize) -> Self {
        Self {
            bits: vec![0; (n + 1 + 63) / 64],
        }
    }

    pub fn get(&self, i: usize) -> bool {
        (self.bits[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn toggle(&mut self, i: usize) {
        self.bits[i / 64] ^= 1 << (i % 64);
    }

    fn add(&mut self, other: &Equation) {
        for (a, b) in self.bits.iter_mut().zip(other.bits.iter()) {
            *a ^= *b;
        }
    }
}

/// Solves a system of `n` unknowns with Gauss-Jordan elimination.
///
/// The right-hand side of each equation is its bit `n`. Unknowns left free by a singular system
/// are set to zero.
pub fn solve(mut equations: Vec<Equation>, n: usize) -> Vec<bool> {
    let mut pivots = Vec::with_capacity(n);
    let mut rank = 0;
    for col in 0..n {
        let pivot = match (rank..equations.len()).find(|r| equations[*r].get(col)) {
            Some(pivot) => pivot,
            None => continue,
        };
        equations.swap(rank, pivot);
        let (before, rest) = equations.split_at_mut(rank);
        let (pivot_row, after) = rest.split_at_mut(1);
        let pivot_row = &pivot_row[0];
        for row in before.iter_mut().chain(after.iter_mut()) {
            if row.get(col) {
                row.add(pivot_row);
            }
        }
        pivots.push(col);
        rank += 1;
    }

    let mut solution = vec![false; n];
    for (row, col) in equations.iter().zip(pivots.iter()) {
        solution[*col] = row.get(n);
    }
    solution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_system() {
        // x0 + x1 = 1, x1 + x2 = 0, x0 + x1 + x2 = 1
        let mut eqs = vec![Equation::new(3), Equation::new(3), Equation::new(3)];
        for (row, coeffs, rhs) in [(0, [0, 1], true), (1, [1, 2], false)].iter() {
            for c in coeffs.iter() {
                eqs[*row].toggle(*c);
            }
            if *rhs {
                eqs[*row].toggle(3);
            }
        }
        eqs[2].toggle(0);
        eqs[2].toggle(1);
        eqs[2].toggle(2);
        eqs[2].toggle(3);
        assert_eq!(solve(eqs, 3), vec![true, false, false]);
    }
}
