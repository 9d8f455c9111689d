//! vm - Simulador de paginação com alocação prévia de frames e uma TLB
//! que só cresce.
//!
//! O fluxo é sempre o mesmo: cada processo passa pela admissão (que monta a
//! tabela de páginas tirando frames do [`frame_pool::FramePool`]) e depois o
//! [`dispatcher::Dispatcher`] roda round-robin até todo mundo terminar,
//! contando hits e misses na [`tlb::Tlb`]. O [`mmu::Mmu`] junta tudo isso.

pub mod constants;
pub mod dispatcher;
pub mod frame_pool;
pub mod frame_selector;
pub mod loader;
pub mod mmu;
pub mod page_table;
pub mod process;
pub mod tlb;

pub use constants::{VmConfig, ACCESS_QUANTUM, FRAME_COUNT, MAX_FRAME_COUNT, PAGE_SIZE};
pub use mmu::{Mmu, ProcessReport};
pub use process::{Admission, AdmissionError, ProcessDescription, RejectReason, Rejection};
