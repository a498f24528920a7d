mod mocks;

mod campaigns;
mod donations;
mod orders;
