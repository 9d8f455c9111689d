use std::fmt;

use log::trace;

use crate::frame_selector::FrameSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Não sobrou nenhum frame livre.
    OutOfFrames,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::OutOfFrames => write!(f, "no free frames left"),
        }
    }
}

impl std::error::Error for AllocError {}

/// Conjunto fixo de frames físicos.
///
/// Frames só saem daqui: uma vez alocado, o frame pertence ao processo até o
/// fim da simulação e nunca é devolvido.
#[derive(Debug, Clone)]
pub struct FramePool {
    /// `true` = livre.
    frames: Vec<bool>,
    free_count: usize,
}

impl FramePool {
    pub fn new(capacity: usize) -> Self {
        FramePool {
            frames: vec![true; capacity],
            free_count: capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn free_count(&self) -> usize {
        self.free_count
    }

    pub fn allocated_count(&self) -> usize {
        self.capacity() - self.free_count
    }

    pub fn is_free(&self, frame_index: usize) -> bool {
        self.frames.get(frame_index).copied().unwrap_or(false)
    }

    pub fn has_enough_space(&self, pages: usize) -> bool {
        self.free_count >= pages
    }

    fn free_frames(&self) -> Vec<usize> {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(idx, &free)| free.then_some(idx))
            .collect()
    }

    /// Tira um frame livre do pool, escolhido pelo `selector` entre os que
    /// estão livres agora.
    pub fn allocate_one<S: FrameSelector>(&mut self, selector: &mut S) -> Result<usize, AllocError> {
        let candidates = self.free_frames();

        if candidates.is_empty() {
            return Err(AllocError::OutOfFrames);
        }

        let chosen = candidates[selector.select(&candidates)];

        self.frames[chosen] = false;
        self.free_count -= 1;

        trace!("frame_pool: frame {} allocated, {} free", chosen, self.free_count);

        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_selector::{LowestFrameSelector, RandomFrameSelector};

    #[test]
    fn starts_fully_free() {
        let pool = FramePool::new(250);

        assert_eq!(pool.capacity(), 250);
        assert_eq!(pool.free_count(), 250);
        assert_eq!(pool.allocated_count(), 0);
        assert!((0..250).all(|i| pool.is_free(i)));
        assert!(!pool.is_free(250));
    }

    #[test]
    fn allocation_marks_frame_used() {
        let mut pool = FramePool::new(4);
        let mut selector = LowestFrameSelector;

        assert_eq!(pool.allocate_one(&mut selector), Ok(0));
        assert_eq!(pool.allocate_one(&mut selector), Ok(1));
        assert!(!pool.is_free(0));
        assert!(!pool.is_free(1));
        assert!(pool.is_free(2));
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn never_hands_out_the_same_frame_twice() {
        let mut pool = FramePool::new(64);
        let mut selector = RandomFrameSelector::seeded(99);
        let mut taken: Vec<usize> = (0..64)
            .map(|_| pool.allocate_one(&mut selector).unwrap())
            .collect();

        taken.sort_unstable();
        taken.dedup();

        assert_eq!(taken.len(), 64);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn exhausted_pool_fails() {
        let mut pool = FramePool::new(1);
        let mut selector = LowestFrameSelector;

        pool.allocate_one(&mut selector).unwrap();

        assert_eq!(pool.allocate_one(&mut selector), Err(AllocError::OutOfFrames));
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn selection_only_sees_free_frames() {
        struct LastSelector;

        impl FrameSelector for LastSelector {
            fn select(&mut self, free: &[usize]) -> usize {
                free.len() - 1
            }
        }

        let mut pool = FramePool::new(3);
        let mut selector = LastSelector;

        assert_eq!(pool.allocate_one(&mut selector), Ok(2));
        assert_eq!(pool.allocate_one(&mut selector), Ok(1));
        assert_eq!(pool.allocate_one(&mut selector), Ok(0));
    }

    #[test]
    fn enough_space_is_a_pure_query() {
        let pool = FramePool::new(10);

        assert!(pool.has_enough_space(10));
        assert!(!pool.has_enough_space(11));
        assert_eq!(pool.free_count(), 10);
    }
}
