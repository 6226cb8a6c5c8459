pub mod alphavantage;
