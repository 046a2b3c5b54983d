mod new;
mod property;
mod shape;
