// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no tensor maths, no file formats.
//
//   train_use_case — config check → datasets → model → training
//                    → log → plot → evaluation → checkpoint
//   eval_use_case  — reload a finished run and re-evaluate it

pub mod train_use_case;

pub mod eval_use_case;
