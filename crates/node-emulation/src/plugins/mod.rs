pub mod node_emulation;
