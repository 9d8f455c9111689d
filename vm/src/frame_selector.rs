use rand::{rngs::StdRng, Rng, SeedableRng};

/// Escolhe qual frame livre entrega para a próxima página.
///
/// `free` é a lista, em ordem crescente, dos índices de frames livres no
/// momento da chamada e nunca vem vazia. O retorno é uma *posição* nessa
/// lista, não um índice de frame.
pub trait FrameSelector {
    fn select(&mut self, free: &[usize]) -> usize;
}

/// Sorteia uniformemente entre os frames livres.
pub struct RandomFrameSelector<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RandomFrameSelector<R> {
    pub fn new(rng: R) -> Self {
        RandomFrameSelector { rng }
    }
}

impl RandomFrameSelector<StdRng> {
    pub fn from_entropy() -> Self {
        RandomFrameSelector::new(StdRng::from_entropy())
    }

    /// Mesma semente, mesmas tabelas de página.
    pub fn seeded(seed: u64) -> Self {
        RandomFrameSelector::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FrameSelector for RandomFrameSelector<R> {
    fn select(&mut self, free: &[usize]) -> usize {
        self.rng.gen_range(0..free.len())
    }
}

/// Sempre pega o menor frame livre. Útil quando o teste precisa saber
/// exatamente quais frames cada página recebeu.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestFrameSelector;

impl FrameSelector for LowestFrameSelector {
    fn select(&mut self, _free: &[usize]) -> usize {
        0
    }
}
