pub const MAX_SEATINGS: usize = 24;

/// Seat assignments to replay each deal with. Entry `i` of a seating is the
/// index of the agent sitting at seat `i` (North, East, South, West).
pub struct SeatingPlan {
    seatings: Vec<[usize; 4]>,
}

impl SeatingPlan {
    /// The first `count` seatings in lexicographic order, starting from the
    /// configured one.
    pub fn new(count: usize) -> Self {
        let limit = count.clamp(1, MAX_SEATINGS);
        let mut seatings = Vec::with_capacity(limit);
        let mut current = [0usize, 1, 2, 3];
        seatings.push(current);
        while seatings.len() < limit && next_seating(&mut current) {
            seatings.push(current);
        }
        Self { seatings }
    }

    pub fn as_slice(&self) -> &[[usize; 4]] {
        &self.seatings
    }

    pub fn len(&self) -> usize {
        self.seatings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seatings.is_empty()
    }
}

fn next_seating(seating: &mut [usize; 4]) -> bool {
    let Some(pivot) = (0..seating.len() - 1).rev().find(|&i| seating[i] < seating[i + 1]) else {
        return false;
    };
    let Some(successor) = (pivot + 1..seating.len())
        .rev()
        .find(|&j| seating[j] > seating[pivot])
    else {
        return false;
    };
    seating.swap(pivot, successor);
    seating[pivot + 1..].reverse();
    true
}
