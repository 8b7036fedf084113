pub mod animationfile;
pub mod rigfile;
pub mod skeletonfile;
