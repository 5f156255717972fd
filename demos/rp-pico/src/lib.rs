#![no_std]

pub mod adc;
pub mod sio_bank;
pub mod time;
