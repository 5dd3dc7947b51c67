mod vegetable;

pub use vegetable::{NewVegetable, Vegetable};
