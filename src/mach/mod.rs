/*!
## Rust Machine Module

This Rust module runs BASIC straight from lexed lines.

A [`Runtime`] owns the program [`Listing`], the variable store and the
control stacks. Each statement is dispatched from the token under a
[`Cursor`](cursor::Cursor); expressions are evaluated in place with a
shunting-yard pass. Everything visible goes through the [`Console`]
trait so the same runtime drives a terminal or an in-memory buffer.

*/

mod console;
mod cursor;
mod eval;
mod function;
mod graphics;
mod listing;
mod maintenance;
mod operation;
mod procedure;
mod runtime;
mod stack;
mod statement;
mod val;
mod var;

pub use console::Console;
pub use console::CR;
pub use cursor::Cursor;
pub use eval::Target;
pub use function::Angle;
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::render_number;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
