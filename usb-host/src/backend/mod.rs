pub mod mtk;
