/// Tabela de páginas de um processo: a posição é o page number, o valor é
/// o índice do frame físico.
///
/// É montada inteira na admissão e não muda mais depois disso.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTable {
    frames: Vec<usize>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable { frames: Vec::new() }
    }

    pub fn with_capacity(pages: usize) -> Self {
        PageTable {
            frames: Vec::with_capacity(pages),
        }
    }

    /// Mapeia a próxima página para `frame_index`.
    pub fn push(&mut self, frame_index: usize) {
        self.frames.push(frame_index);
    }

    pub fn frame_of(&self, page_number: usize) -> Option<usize> {
        self.frames.get(page_number).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Pares `(page_number, frame_index)` em ordem de página.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.frames.iter().copied().enumerate()
    }
}
